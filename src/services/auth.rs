// ABOUTME: Account service handling sign-up, login, and user lookups
// ABOUTME: Validates credentials, hashes passwords with bcrypt, and issues JWT sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use calorie_core::constants::auth::MIN_PASSWORD_LENGTH;
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{AuthResponse, User, UserLogin, UserResponse, UserSignUp};
use tracing::{info, warn};

use crate::auth::{AuthManager, Claims, PasswordHasher};
use crate::database::Database;
use crate::logging::AppLogger;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    database: Database,
    auth_manager: Arc<AuthManager>,
    password_hasher: PasswordHasher,
}

impl AuthService {
    /// Create a service over the given store and credential helpers
    #[must_use]
    pub const fn new(
        database: Database,
        auth_manager: Arc<AuthManager>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            database,
            auth_manager,
            password_hasher,
        }
    }

    /// Register a new account and open a session for it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email, short password, or blank
    /// name, `ResourceAlreadyExists` when the email is taken, or an internal
    /// error if hashing, storage, or token signing fails
    pub async fn sign_up(&self, request: UserSignUp) -> AppResult<AuthResponse> {
        info!("User registration attempt for email: {}", request.email);

        let email = request.email.trim();
        let name = request.name.trim();

        if !Self::is_valid_email(email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if name.is_empty() {
            return Err(AppError::invalid_input("Name is required"));
        }

        if self.database.get_user_by_email(email).await?.is_some() {
            AppLogger::log_auth_event(email, "sign_up", false, Some("email already registered"));
            return Err(AppError::already_exists("A user with this email already exists"));
        }

        let password_hash = self.password_hasher.hash(&request.password).await?;
        let user = self.database.create_user(email, &password_hash, name).await?;

        info!("User registered successfully: {} ({})", user.email, user.id);
        AppLogger::log_auth_event(&user.email, "sign_up", true, None);

        self.issue_session(&user)
    }

    /// Verify credentials and open a session
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for bad credentials, or an internal error if the
    /// lookup, hash check, or token signing fails
    pub async fn login(&self, request: UserLogin) -> AppResult<AuthResponse> {
        info!("User login attempt for email: {}", request.email);

        let email = request.email.trim();
        let Some(user) = self.database.get_user_by_email(email).await? else {
            AppLogger::log_auth_event(email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)
            .await?
        {
            warn!("Invalid password for user: {}", user.email);
            AppLogger::log_auth_event(&user.email, "login", false, Some("wrong password"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        info!("User logged in successfully: {} ({})", user.email, user.id);
        AppLogger::log_auth_event(&user.email, "login", true, None);

        self.issue_session(&user)
    }

    /// Resolve a bearer token to its user
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired` or `AuthInvalid` for a bad token or one whose
    /// account no longer exists
    pub async fn authenticate_token(&self, token: &str) -> AppResult<User> {
        let claims: Claims = self.auth_manager.validate_token_detailed(token)?;
        self.database
            .get_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Token refers to an unknown user"))
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no such user exists
    pub async fn get_user(&self, user_id: i64) -> AppResult<User> {
        self.database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))
    }

    /// Simple email validation
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= MIN_PASSWORD_LENGTH
    }

    fn issue_session(&self, user: &User) -> AppResult<AuthResponse> {
        let token = self.auth_manager.generate_token(user)?;
        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }
}
