// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Thin JSON wrappers that delegate account logic to the auth service
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Authentication routes for user management
//!
//! Both handlers return an [`AuthResponse`] carrying the public user view and a
//! signed JWT for use as a `Bearer` token.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use calorie_core::errors::AppError;
use calorie_core::models::{AuthResponse, UserLogin, UserSignUp};

use crate::resources::ServerResources;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/sign-up", post(Self::handle_sign_up))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle account registration
    async fn handle_sign_up(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<UserSignUp>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload.map_err(json_rejection)?;
        let response: AuthResponse = resources.auth_service().sign_up(request).await?;

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<UserLogin>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload.map_err(json_rejection)?;
        let response = resources.auth_service().login(request).await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

/// Map a body extraction failure to a 400 with the parser's message
pub(crate) fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
}
