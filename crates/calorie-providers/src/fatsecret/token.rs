// ABOUTME: OAuth2 bearer token cache with expiry-aware, single-flight refresh
// ABOUTME: Tokens are discarded a fixed safety margin before their stated expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::future::Future;
use tokio::sync::Mutex;

use super::error::FatSecretError;

/// Successful body of the OAuth2 token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Bearer token value
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Token type, normally "Bearer"
    #[serde(default)]
    pub token_type: String,
    /// Granted scope
    #[serde(default)]
    pub scope: String,
}

/// A bearer token together with the instant it stops being usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    /// Bearer token value
    pub access_token: String,
    /// Issue time plus lifetime minus the safety margin
    pub expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Build a cached token from a grant issued at `issued_at`
    ///
    /// # Errors
    ///
    /// Rejects grants with an empty token or a lifetime that does not exceed
    /// the safety margin, since such a token would already be expired.
    pub fn from_grant(
        grant: TokenGrant,
        issued_at: DateTime<Utc>,
        safety_margin: Duration,
    ) -> Result<Self, FatSecretError> {
        if grant.access_token.is_empty() {
            return Err(FatSecretError::TokenAcquisition(
                "token endpoint returned an empty access_token".into(),
            ));
        }

        let lifetime = Duration::try_seconds(grant.expires_in).ok_or_else(|| {
            FatSecretError::TokenAcquisition(format!(
                "token lifetime of {}s is out of range",
                grant.expires_in
            ))
        })?;
        if lifetime <= safety_margin {
            return Err(FatSecretError::TokenAcquisition(format!(
                "token lifetime of {}s does not exceed the {}s safety margin",
                grant.expires_in,
                safety_margin.num_seconds()
            )));
        }

        let expires_at = issued_at
            .checked_add_signed(lifetime - safety_margin)
            .ok_or_else(|| {
                FatSecretError::TokenAcquisition(format!(
                    "token lifetime of {}s is out of range",
                    grant.expires_in
                ))
            })?;

        Ok(Self {
            access_token: grant.access_token,
            expires_at,
        })
    }

    /// Whether the token may still be sent at `now`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Process-wide cache for the client-credentials token
///
/// The lock is held across the refresh call, so concurrent callers that find
/// the token missing or expired wait for one exchange and then reuse it.
#[derive(Debug)]
pub struct TokenCache {
    slot: Mutex<Option<BearerToken>>,
    safety_margin: Duration,
}

impl TokenCache {
    /// Create an empty cache
    #[must_use]
    pub fn new(safety_margin_secs: i64) -> Self {
        Self {
            slot: Mutex::new(None),
            safety_margin: Duration::seconds(safety_margin_secs),
        }
    }

    /// Return the cached token if it is still valid, otherwise run `refresh`
    /// once and cache its result
    ///
    /// `clock` is read after the lock is taken, so a caller that waited behind
    /// another refresh judges expiry at the time it actually gets the slot.
    ///
    /// # Errors
    ///
    /// Propagates the refresh error, or rejects an unusable grant. The cache is
    /// left untouched on failure.
    pub async fn get_or_refresh<C, F, Fut>(
        &self,
        clock: C,
        refresh: F,
    ) -> Result<String, FatSecretError>
    where
        C: Fn() -> DateTime<Utc> + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<TokenGrant, FatSecretError>> + Send,
    {
        let mut slot = self.slot.lock().await;
        let now = clock();

        if let Some(token) = slot.as_ref().filter(|token| token.is_valid_at(now)) {
            return Ok(token.access_token.clone());
        }

        let grant = refresh().await?;
        let token = BearerToken::from_grant(grant, now, self.safety_margin)?;
        tracing::debug!(expires_at = %token.expires_at, "Cached new FatSecret access token");

        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }

    /// Snapshot of the cached token, if any
    pub async fn current(&self) -> Option<BearerToken> {
        self.slot.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Arc;

    fn grant(token: &str, expires_in: i64) -> TokenGrant {
        TokenGrant {
            access_token: token.to_owned(),
            expires_in,
            token_type: "Bearer".into(),
            scope: "basic".into(),
        }
    }

    #[test]
    fn test_expiry_subtracts_safety_margin() {
        let issued_at = Utc::now();
        let token =
            BearerToken::from_grant(grant("abc", 86_400), issued_at, Duration::seconds(60))
                .unwrap();

        assert_eq!(token.expires_at, issued_at + Duration::seconds(86_340));
        assert!(token.is_valid_at(issued_at));
        assert!(!token.is_valid_at(token.expires_at));
    }

    #[test]
    fn test_short_lived_grant_is_rejected() {
        let result = BearerToken::from_grant(grant("abc", 60), Utc::now(), Duration::seconds(60));
        assert!(matches!(result, Err(FatSecretError::TokenAcquisition(_))));
    }

    #[tokio::test]
    async fn test_valid_token_skips_refresh() {
        let cache = TokenCache::new(60);
        let calls = AtomicUsize::new(0);
        let now = Utc::now();

        let first = cache
            .get_or_refresh(|| now, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(grant("first", 3600))
            })
            .await
            .unwrap();
        let second = cache
            .get_or_refresh(|| now + Duration::seconds(30), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(grant("second", 3600))
            })
            .await
            .unwrap();

        assert_eq!(first, "first");
        assert_eq!(second, "first");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_token_refreshes_once() {
        let cache = TokenCache::new(60);
        let calls = AtomicUsize::new(0);
        let issued = Utc::now();

        cache
            .get_or_refresh(|| issued, || async { Ok(grant("old", 120)) })
            .await
            .unwrap();

        let later = issued + Duration::seconds(61);
        let refreshed = cache
            .get_or_refresh(|| later, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(grant("new", 120))
            })
            .await
            .unwrap();
        let reused = cache
            .get_or_refresh(|| later, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(grant("newer", 120))
            })
            .await
            .unwrap();

        assert_eq!(refreshed, "new");
        assert_eq!(reused, "new");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_cache_empty() {
        let cache = TokenCache::new(60);
        let result = cache
            .get_or_refresh(Utc::now, || async {
                Err(FatSecretError::TokenAcquisition("HTTP 500".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(cache.current().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let cache = Arc::new(TokenCache::new(60));
        let calls = Arc::new(AtomicUsize::new(0));
        let now = Utc::now();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_refresh(|| now, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(grant("shared", 3600))
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waiting_caller_reads_clock_after_lock() {
        let cache = Arc::new(TokenCache::new(60));
        let base = Utc::now();
        let offset_secs = Arc::new(AtomicI64::new(0));

        cache
            .get_or_refresh(|| base, || async { Ok(grant("old", 120)) })
            .await
            .unwrap();

        // Holds the lock past the old token's expiry, then fails.
        let blocker = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_refresh(
                        || base + Duration::seconds(61),
                        || async {
                            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                            Err(FatSecretError::TokenAcquisition("HTTP 500".into()))
                        },
                    )
                    .await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        // Queued while the shared clock still says the old token is valid.
        let waiter = {
            let cache = Arc::clone(&cache);
            let offset_secs = Arc::clone(&offset_secs);
            tokio::spawn(async move {
                cache
                    .get_or_refresh(
                        move || base + Duration::seconds(offset_secs.load(Ordering::SeqCst)),
                        || async { Ok(grant("fresh", 3600)) },
                    )
                    .await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        offset_secs.store(61, Ordering::SeqCst);

        assert!(blocker.await.unwrap().is_err());
        assert_eq!(waiter.await.unwrap().unwrap(), "fresh");
    }
}
