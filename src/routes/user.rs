// ABOUTME: Current-user route handler protected by a bearer JWT
// ABOUTME: Resolves the Authorization header to an account and returns its public view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! User routes
//!
//! `GET /user` requires `Authorization: Bearer <jwt>`. The `auth_token`
//! cookie set by the HTML login page is accepted as a fallback.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use calorie_core::constants::auth::AUTH_COOKIE_NAME;
use calorie_core::errors::AppError;
use calorie_core::models::{User, UserResponse};

use crate::resources::ServerResources;
use crate::security::cookies::get_cookie_value;

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/user", get(Self::handle_get_user))
            .with_state(resources)
    }

    /// Extract and authenticate user from authorization header or cookie
    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<User, AppError> {
        // Try Authorization header first, then fall back to auth_token cookie
        let token = if let Some(auth_header) =
            headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
        {
            auth_header
                .strip_prefix("Bearer ")
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .ok_or_else(|| AppError::auth_invalid("Authorization header must be a Bearer token"))?
                .to_owned()
        } else if let Some(token) = get_cookie_value(headers, AUTH_COOKIE_NAME) {
            token
        } else {
            return Err(AppError::auth_required());
        };

        resources.auth_service().authenticate_token(&token).await
    }

    /// Handle current-user lookup
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        Ok(Json(UserResponse::from(&user)).into_response())
    }
}
