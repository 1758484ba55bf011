// ABOUTME: FatSecret Platform API client for food search and detail retrieval
// ABOUTME: OAuth2 client-credentials with a cached token, falling back to OAuth1 signing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! FatSecret Platform API Client
//!
//! Every request is authenticated in one of two ways:
//!
//! 1. `Authorization: Bearer <token>` using an OAuth2 client-credentials token,
//!    cached until 60 seconds before it expires.
//! 2. If the token cannot be obtained for any reason, an OAuth1 HMAC-SHA1
//!    signature over the method, URL, and parameters.
//!
//! The OAuth2 failure is logged and never returned to the caller.
//!
//! # Example
//! ```rust,no_run
//! use calorie_providers::fatsecret::{FatSecretClient, FatSecretConfig, FatSecretCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FatSecretConfig {
//!     credentials: FatSecretCredentials {
//!         client_id: "client-id".into(),
//!         client_secret: "client-secret".into(),
//!         consumer_key: "consumer-key".into(),
//!         consumer_secret: "consumer-secret".into(),
//!     },
//!     ..FatSecretConfig::default()
//! };
//!
//! let client = FatSecretClient::new(config)?;
//! let page = client.search_foods("apple", 0, 20).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::error::FatSecretError;
use super::oauth1::{sign_request, NonceSource, OAuth1Credentials, OAuth1Signature};
use super::token::{TokenCache, TokenGrant};
use super::wire::{DetailEnvelope, SearchEnvelope};
use crate::constants::fatsecret::{
    methods, API_BASE_URL, FORMAT_JSON, GRANT_TYPE, REQUEST_TIMEOUT_SECS, SCOPE,
    TOKEN_SAFETY_MARGIN_SECS, TOKEN_URL,
};
use crate::core::FoodSource;
use crate::errors::AppResult;
use crate::http_client::client_with_timeout;
use crate::models::{FoodDetails, FoodSearchPage};

/// Credentials issued by the FatSecret developer console
#[derive(Clone, Default)]
pub struct FatSecretCredentials {
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// OAuth1 consumer key
    pub consumer_key: String,
    /// OAuth1 consumer secret
    pub consumer_secret: String,
}

impl FatSecretCredentials {
    /// Whether an OAuth2 exchange can be attempted at all
    #[must_use]
    pub fn has_oauth2(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// The OAuth1 half of the credential set
    #[must_use]
    pub fn oauth1(&self) -> OAuth1Credentials {
        OAuth1Credentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
        }
    }
}

impl fmt::Debug for FatSecretCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatSecretCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

/// FatSecret client configuration
#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    /// API credentials
    pub credentials: FatSecretCredentials,
    /// REST method dispatch endpoint
    pub base_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Timeout applied to every outbound request
    pub timeout: Duration,
    /// Seconds subtracted from each token's lifetime
    pub token_safety_margin_secs: i64,
}

impl Default for FatSecretConfig {
    fn default() -> Self {
        Self {
            credentials: FatSecretCredentials::default(),
            base_url: API_BASE_URL.to_owned(),
            token_url: TOKEN_URL.to_owned(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            token_safety_margin_secs: TOKEN_SAFETY_MARGIN_SECS,
        }
    }
}

/// How a single outbound request is authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// OAuth2 bearer token
    Bearer(String),
    /// OAuth1 HMAC-SHA1 signature
    OAuth1(OAuth1Signature),
}

impl RequestAuth {
    /// Value for the `Authorization` header
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::OAuth1(signature) => signature.authorization_header(),
        }
    }
}

/// FatSecret Platform API client
///
/// Share one instance per process so the token cache is shared too.
pub struct FatSecretClient {
    config: FatSecretConfig,
    http_client: reqwest::Client,
    token_cache: TokenCache,
    nonces: NonceSource,
}

impl FatSecretClient {
    /// Create a new FatSecret client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: FatSecretConfig) -> Result<Self, FatSecretError> {
        let http_client = client_with_timeout(config.timeout)?;
        let token_cache = TokenCache::new(config.token_safety_margin_secs);

        Ok(Self {
            config,
            http_client,
            token_cache,
            nonces: NonceSource::new(),
        })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &FatSecretConfig {
        &self.config
    }

    /// The shared bearer token cache
    #[must_use]
    pub const fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    /// Search foods by expression
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 response, an API error
    /// envelope, or an undecodable body
    pub async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        max_results: u32,
    ) -> Result<FoodSearchPage, FatSecretError> {
        let params = [
            ("method", methods::FOODS_SEARCH.to_owned()),
            ("search_expression", query.to_owned()),
            ("page_number", page_number.to_string()),
            ("max_results", max_results.to_string()),
            ("format", FORMAT_JSON.to_owned()),
        ];

        let envelope: SearchEnvelope = self.call(&params).await?;
        if let Some(api_error) = envelope.error {
            return Err(FatSecretError::Api {
                code: api_error.code,
                message: api_error.message,
            });
        }

        let page = FoodSearchPage::from(envelope.foods.unwrap_or_default());
        debug!(
            query,
            page_number,
            results = page.foods.len(),
            total_results = page.total_results,
            "FatSecret food search completed"
        );
        Ok(page)
    }

    /// Fetch a food with all of its servings
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 response, an API error
    /// envelope, or an undecodable body
    pub async fn get_food_details(&self, food_id: &str) -> Result<FoodDetails, FatSecretError> {
        let params = [
            ("method", methods::FOOD_GET.to_owned()),
            ("food_id", food_id.to_owned()),
            ("format", FORMAT_JSON.to_owned()),
        ];

        let envelope: DetailEnvelope = self.call(&params).await?;
        if let Some(api_error) = envelope.error {
            return Err(FatSecretError::Api {
                code: api_error.code,
                message: api_error.message,
            });
        }

        Ok(envelope.food.map(FoodDetails::from).unwrap_or_default())
    }

    /// Decide how to authenticate a request carrying `params`
    ///
    /// Tries the cached or freshly exchanged bearer token first and signs with
    /// OAuth1 when that fails. Never fails itself.
    pub async fn authenticate(&self, params: &[(&str, String)]) -> RequestAuth {
        match self.bearer_token().await {
            Ok(token) => RequestAuth::Bearer(token),
            Err(token_error) => {
                warn!(
                    error = %token_error,
                    "OAuth2 token unavailable, signing FatSecret request with OAuth1"
                );
                RequestAuth::OAuth1(self.sign_oauth1(params))
            }
        }
    }

    async fn bearer_token(&self) -> Result<String, FatSecretError> {
        if !self.config.credentials.has_oauth2() {
            return Err(FatSecretError::TokenAcquisition(
                "OAuth2 client credentials are not configured".into(),
            ));
        }

        self.token_cache
            .get_or_refresh(Utc::now, || self.request_token())
            .await
    }

    async fn request_token(&self) -> Result<TokenGrant, FatSecretError> {
        debug!(token_url = %self.config.token_url, "Requesting FatSecret access token");

        let credentials = &self.config.credentials;
        let response = self
            .http_client
            .post(&self.config.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", GRANT_TYPE), ("scope", SCOPE)])
            .send()
            .await
            .map_err(|e| FatSecretError::TokenAcquisition(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FatSecretError::TokenAcquisition(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| FatSecretError::TokenAcquisition(format!("malformed token response: {e}")))
    }

    fn sign_oauth1(&self, params: &[(&str, String)]) -> OAuth1Signature {
        sign_request(
            "GET",
            &self.config.base_url,
            params,
            &self.config.credentials.oauth1(),
            Utc::now().timestamp(),
            &self.nonces.next_nonce(),
        )
    }

    async fn call<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, FatSecretError> {
        let auth = self.authenticate(params).await;

        // Business parameters use form-urlencoding here, not the RFC 3986
        // encoding covered by the OAuth1 signature.
        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(params)
            .header(AUTHORIZATION, auth.header_value())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            error!(
                status = status.as_u16(),
                body = %body,
                "FatSecret API request failed"
            );
            return Err(FatSecretError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FatSecretError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FoodSource for FatSecretClient {
    fn name(&self) -> &'static str {
        "fatsecret"
    }

    async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        max_results: u32,
    ) -> AppResult<FoodSearchPage> {
        Ok(Self::search_foods(self, query, page_number, max_results).await?)
    }

    async fn get_food_details(&self, food_id: &str) -> AppResult<FoodDetails> {
        Ok(Self::get_food_details(self, food_id).await?)
    }
}
