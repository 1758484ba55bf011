// ABOUTME: Food lookup service sitting between route handlers and the nutrition provider
// ABOUTME: Validates search input, applies paging defaults, and records upstream call timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{FoodDetails, FoodSearchRequest, FoodSearchResponse};
use calorie_providers::FoodSource;

use crate::logging::AppLogger;

/// Food search and detail lookups
#[derive(Clone)]
pub struct FoodService {
    food_source: Arc<dyn FoodSource>,
}

impl FoodService {
    /// Create a service backed by `food_source`
    #[must_use]
    pub fn new(food_source: Arc<dyn FoodSource>) -> Self {
        Self { food_source }
    }

    /// Search foods, defaulting to the first page of 50 results
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query, or the provider's error
    pub async fn search_foods(&self, request: &FoodSearchRequest) -> AppResult<FoodSearchResponse> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("query is required"));
        }

        let page = request.page_or_default();
        let limit = request.limit_or_default();

        let started = Instant::now();
        let result = self.food_source.search_foods(query, page, limit).await;
        AppLogger::log_food_api_call(
            self.food_source.name(),
            "search_foods",
            result.is_ok(),
            elapsed_ms(started),
        );

        let found = result?;
        Ok(FoodSearchResponse {
            foods: found.foods,
            total_results: found.total_results,
            page,
            limit,
        })
    }

    /// Fetch one food with its servings
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank id, or the provider's error
    pub async fn get_food_details(&self, food_id: &str) -> AppResult<FoodDetails> {
        let food_id = food_id.trim();
        if food_id.is_empty() {
            return Err(AppError::invalid_input("food_id is required"));
        }

        let started = Instant::now();
        let result = self.food_source.get_food_details(food_id).await;
        AppLogger::log_food_api_call(
            self.food_source.name(),
            "get_food_details",
            result.is_ok(),
            elapsed_ms(started),
        );

        result.map_err(|e| e.with_resource_id(food_id))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
