// ABOUTME: JWT-based user authentication and bcrypt password hashing
// ABOUTME: Handles token generation, detailed validation, and off-executor password checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication and Session Management
//!
//! Sessions are stateless HS256 JWTs carrying the user id and email. The same
//! token is accepted as a `Bearer` header by the JSON API and as the
//! `auth_token` cookie by the HTML pages.

use anyhow::{anyhow, Context, Result};
use calorie_core::constants::auth::{DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let duration_expired = current_time.signed_duration_since(*expired_at);
                if duration_expired.num_minutes() < 60 {
                    write!(
                        f,
                        "JWT token expired {} minutes ago at {}",
                        duration_expired.num_minutes(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                } else {
                    write!(
                        f,
                        "JWT token expired {} hours ago at {}",
                        duration_expired.num_hours(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                }
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { .. } | JwtValidationError::TokenMalformed { .. } => {
                Self::auth_invalid(error.to_string())
            }
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub user_id: i64,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String> {
        self.generate_token_at(user, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows the timestamp range or JWT
    /// encoding fails
    pub fn generate_token_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String> {
        let expiry = Duration::try_hours(self.token_expiry_hours)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                anyhow!(
                    "JWT expiry of {} hours is out of range",
                    self.token_expiry_hours
                )
            })?;
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to encode JWT")
    }

    /// Validate a token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, its signature
    /// does not verify, or it is not a well-formed JWT
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        let current_time = Utc::now();
        if current_time.timestamp() >= claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::warn!(
                "JWT token expired for user: {} at {}",
                claims.user_id,
                expired_at.to_rfc3339()
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        Ok(claims)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::debug!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// bcrypt password hashing with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher; a cost outside bcrypt's accepted range falls back to the default
    #[must_use]
    pub fn new(cost: u32) -> Self {
        let cost = if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            cost
        } else {
            tracing::warn!(
                "bcrypt cost {cost} out of range, using default {DEFAULT_BCRYPT_COST}"
            );
            DEFAULT_BCRYPT_COST
        };
        Self { cost }
    }

    /// Effective work factor
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password off the async executor
    ///
    /// # Errors
    ///
    /// Returns an internal error if hashing fails or the blocking task panics
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
    }

    /// Check a password against a stored hash off the async executor
    ///
    /// # Errors
    ///
    /// Returns an internal error if the hash is unreadable or the blocking task panics
    pub async fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            email: "ada@example.com".into(),
            password_hash: String::new(),
            name: "Ada".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_token_round_trip_carries_claims() {
        let manager = AuthManager::new(b"test-secret", 24);
        let token = manager.generate_token(&test_user()).unwrap();
        let claims = manager.validate_token_detailed(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = AuthManager::new(b"test-secret", 1);
        let token = manager
            .generate_token_at(&test_user(), Utc::now() - Duration::hours(2))
            .unwrap();

        let error = manager.validate_token_detailed(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenExpired { .. }));
    }

    #[test]
    fn test_overflowing_expiry_is_an_error() {
        let manager = AuthManager::new(b"test-secret", 10_000_000_000);
        assert!(manager.generate_token(&test_user()).is_err());

        let manager = AuthManager::new(b"test-secret", i64::MAX);
        assert!(manager.generate_token(&test_user()).is_err());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuer = AuthManager::new(b"issuer-secret", 24);
        let verifier = AuthManager::new(b"other-secret", 24);
        let token = issuer.generate_token(&test_user()).unwrap();

        let error = verifier.validate_token_detailed(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenInvalid { .. }));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = AuthManager::new(b"test-secret", 24);
        let error = manager.validate_token_detailed("not-a-jwt").unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenMalformed { .. }));
    }

    #[test]
    fn test_out_of_range_cost_falls_back() {
        assert_eq!(PasswordHasher::new(2).cost(), DEFAULT_BCRYPT_COST);
        assert_eq!(PasswordHasher::new(40).cost(), DEFAULT_BCRYPT_COST);
        assert_eq!(PasswordHasher::new(4).cost(), 4);
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("hunter22").await.unwrap();

        assert!(hasher.verify("hunter22", &hash).await.unwrap());
        assert!(!hasher.verify("hunter23", &hash).await.unwrap());
    }
}
