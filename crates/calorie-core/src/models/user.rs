// ABOUTME: User account model and authentication request/response payloads
// ABOUTME: User, UserSignUp, UserLogin, UserResponse, and AuthResponse definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Database identifier
    pub id: i64,
    /// Unique login email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignUp {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Database identifier
    pub id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Result of a successful sign-up or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Authenticated user
    pub user: UserResponse,
    /// Signed JWT
    pub token: String,
}
