// ABOUTME: Food and serving models returned by nutrition searches and detail lookups
// ABOUTME: FoodSearchRequest/Response payloads with paging defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::food::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// Summary of a food returned by a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Provider food identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Brand name for branded products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Provider food type ("Generic", "Brand")
    #[serde(rename = "type")]
    pub food_type: String,
    /// Provider page for this food
    pub url: String,
    /// Calories (kcal) for the reference amount
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Protein (g)
    pub protein: f64,
    /// Fat (g)
    pub fat: f64,
}

/// A single serving option for a food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    /// Provider serving identifier
    pub id: String,
    /// Human description ("1 cup", "100 g")
    pub description: String,
    /// Provider page for this serving
    pub url: String,
    /// Metric amount of the serving
    pub metric_serving_amount: f64,
    /// Metric unit ("g", "ml")
    pub metric_serving_unit: String,
    /// Number of measurement units
    pub number_of_units: f64,
    /// Measurement description ("cup", "serving")
    pub measurement_description: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Protein (g)
    pub protein: f64,
    /// Fat (g)
    pub fat: f64,
    /// Saturated fat (g)
    pub saturated_fat: f64,
    /// Fiber (g)
    pub fiber: f64,
    /// Cholesterol (mg)
    pub cholesterol: f64,
    /// Sodium (mg)
    pub sodium: f64,
    /// Sugar (g)
    pub sugar: f64,
}

/// Full food record with every serving option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodDetails {
    /// Provider food identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Brand name for branded products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Serving options
    pub servings: Vec<Serving>,
}

/// One page of search results as returned by a food source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodSearchPage {
    /// Foods on this page
    pub foods: Vec<Food>,
    /// Total number of matches across all pages
    pub total_results: u32,
}

/// Query parameters for `GET /food/search`
#[derive(Debug, Clone, Deserialize)]
pub struct FoodSearchRequest {
    /// Search expression
    #[serde(default)]
    pub query: String,
    /// Zero-based page number; unparseable values count as absent
    #[serde(default, deserialize_with = "lenient_paging")]
    pub page: Option<u32>,
    /// Maximum results per page; unparseable values count as absent
    #[serde(default, deserialize_with = "lenient_paging")]
    pub limit: Option<u32>,
}

fn lenient_paging<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl FoodSearchRequest {
    /// Page number with the default applied
    #[must_use]
    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Page size with the default applied; zero also falls back to the default
    #[must_use]
    pub fn limit_or_default(&self) -> u32 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        }
    }
}

/// Response body for `GET /food/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSearchResponse {
    /// Foods on this page
    pub foods: Vec<Food>,
    /// Total number of matches
    pub total_results: u32,
    /// Page that was served
    pub page: u32,
    /// Page size that was requested
    pub limit: u32,
}
