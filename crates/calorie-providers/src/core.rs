// ABOUTME: Core provider trait for nutrition data sources
// ABOUTME: Services depend on FoodSource so upstream clients stay swappable in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{FoodDetails, FoodSearchPage};

/// A searchable catalog of foods with nutrition facts
#[async_trait]
pub trait FoodSource: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Search foods by free-text expression
    ///
    /// `page_number` is zero-based.
    async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        max_results: u32,
    ) -> AppResult<FoodSearchPage>;

    /// Fetch one food with all of its servings
    async fn get_food_details(&self, food_id: &str) -> AppResult<FoodDetails>;
}
