// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports liveness plus database reachability for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> axum::Router {
        use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
        use calorie_core::constants::{endpoints, service};

        async fn health_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let database_ok = sqlx::query("SELECT 1")
                .execute(resources.database.pool())
                .await
                .is_ok();
            let status = if database_ok {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };

            (
                status,
                Json(serde_json::json!({
                    "status": if database_ok { "healthy" } else { "degraded" },
                    "service": service::APP_NAME,
                    "version": resources.config.app.version,
                    "database": if database_ok { "ok" } else { "unreachable" },
                    "food_provider": resources.food_source.name(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }

        Router::new()
            .route(endpoints::HEALTH_CHECK, get(health_handler))
            .with_state(resources)
    }
}
