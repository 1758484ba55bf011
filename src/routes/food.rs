// ABOUTME: Food search and detail route handlers
// ABOUTME: Parses query parameters and delegates lookups to the food service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food routes
//!
//! - `GET /food/search?query=&page=&limit=` (page defaults to 0, limit to 50)
//! - `GET /food/:food_id`

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use calorie_core::errors::AppError;
use calorie_core::models::FoodSearchRequest;

use crate::resources::ServerResources;

/// Food routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/food/search", get(Self::handle_search))
            .route("/food/:food_id", get(Self::handle_get_food))
            .with_state(resources)
    }

    /// Handle food search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<FoodSearchRequest>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(request) = query.map_err(|rejection| {
            AppError::invalid_input(format!(
                "Invalid query parameters: {}",
                rejection.body_text()
            ))
        })?;

        let response = resources.food_service().search_foods(&request).await?;
        Ok(Json(response).into_response())
    }

    /// Handle food detail lookup
    async fn handle_get_food(
        State(resources): State<Arc<ServerResources>>,
        Path(food_id): Path<String>,
    ) -> Result<Response, AppError> {
        let details = resources.food_service().get_food_details(&food_id).await?;
        Ok(Json(details).into_response())
    }
}
