// ABOUTME: Wire-format structures for FatSecret JSON responses
// ABOUTME: Lenient decoding of string-or-number fields and one-or-many collections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! FatSecret encodes numbers as strings, collapses single-element lists into a
//! bare object, and omits empty collections. The types here absorb all of
//! that; numeric fields that fail to parse become zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{Food, FoodDetails, FoodSearchPage, Serving};

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_i64().unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// A collection FatSecret sends as an array, or as a bare object when it has one element
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Array form
    Many(Vec<T>),
    /// Single-element form
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into a vector
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Error envelope FatSecret returns with HTTP 200
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// FatSecret error code
    #[serde(default, deserialize_with = "lenient_i64")]
    pub code: i64,
    /// Error message
    #[serde(default)]
    pub message: String,
}

/// `foods.search` response body
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    /// Result page; absent when the API reports an error
    #[serde(default)]
    pub foods: Option<FoodsPage>,
    /// API-level error
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// The `foods` member of a search response
#[derive(Debug, Default, Deserialize)]
pub struct FoodsPage {
    /// Matches; absent or null when nothing matched
    #[serde(default)]
    pub food: Option<OneOrMany<WireFood>>,
    /// Page size echoed back
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max_results: u32,
    /// Page number echoed back
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page_number: u32,
    /// Total number of matches
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_results: u32,
}

impl From<FoodsPage> for FoodSearchPage {
    fn from(page: FoodsPage) -> Self {
        Self {
            foods: page
                .food
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(Food::from)
                .collect(),
            total_results: page.total_results,
        }
    }
}

/// One search hit
#[derive(Debug, Deserialize)]
pub struct WireFood {
    /// Food id
    #[serde(default, deserialize_with = "lenient_string")]
    pub food_id: String,
    /// Food name
    #[serde(default)]
    pub food_name: String,
    /// Brand, for branded foods
    #[serde(default)]
    pub brand_name: Option<String>,
    /// "Generic" or "Brand"
    #[serde(default)]
    pub food_type: String,
    /// FatSecret page
    #[serde(default)]
    pub food_url: String,
    /// Nutrition summary
    #[serde(default)]
    pub food_description: Option<FoodDescription>,
}

/// Search hit nutrition, either structured or FatSecret's summary sentence
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FoodDescription {
    /// `{calories, carbohydrate, protein, fat}`
    Macros(DescriptionMacros),
    /// `"Per 100g - Calories: 52kcal | Fat: 0.17g | Carbs: 13.81g | Protein: 0.26g"`
    Summary(String),
}

/// Structured macro breakdown
#[derive(Debug, Default, Deserialize)]
pub struct DescriptionMacros {
    /// Calories (kcal)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbohydrate: f64,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat: f64,
}

impl FoodDescription {
    fn into_macros(self) -> DescriptionMacros {
        match self {
            Self::Macros(macros) => macros,
            Self::Summary(text) => parse_summary(&text),
        }
    }
}

/// Pull macros out of a summary like `Per 100g - Calories: 52kcal | Fat: 0.17g`
fn parse_summary(text: &str) -> DescriptionMacros {
    let mut macros = DescriptionMacros::default();

    for segment in text.split(['|', '-']) {
        let Some((label, value)) = segment.split_once(':') else {
            continue;
        };
        let number: String = value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let amount = number.parse().unwrap_or(0.0);

        match label.trim().to_ascii_lowercase().as_str() {
            "calories" => macros.calories = amount,
            "carbs" | "carbohydrate" => macros.carbohydrate = amount,
            "protein" => macros.protein = amount,
            "fat" => macros.fat = amount,
            _ => {}
        }
    }

    macros
}

impl From<WireFood> for Food {
    fn from(food: WireFood) -> Self {
        let macros = food
            .food_description
            .map(FoodDescription::into_macros)
            .unwrap_or_default();

        Self {
            id: food.food_id,
            name: food.food_name,
            brand_name: non_empty(food.brand_name),
            food_type: food.food_type,
            url: food.food_url,
            calories: macros.calories,
            carbs: macros.carbohydrate,
            protein: macros.protein,
            fat: macros.fat,
        }
    }
}

/// `food.get` response body
#[derive(Debug, Deserialize)]
pub struct DetailEnvelope {
    /// The food; absent when the API reports an error
    #[serde(default)]
    pub food: Option<WireFoodDetail>,
    /// API-level error
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Full food record
#[derive(Debug, Deserialize)]
pub struct WireFoodDetail {
    /// Food id
    #[serde(default, deserialize_with = "lenient_string")]
    pub food_id: String,
    /// Food name
    #[serde(default)]
    pub food_name: String,
    /// Brand, for branded foods
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Serving options
    #[serde(default)]
    pub servings: Option<WireServings>,
}

/// The `servings` member of a food record
#[derive(Debug, Default, Deserialize)]
pub struct WireServings {
    /// Serving list
    #[serde(default, alias = "serving_size")]
    pub serving: Option<OneOrMany<WireServing>>,
}

/// One serving option
#[derive(Debug, Deserialize)]
pub struct WireServing {
    /// Serving id
    #[serde(default, deserialize_with = "lenient_string")]
    pub serving_id: String,
    /// Description
    #[serde(default)]
    pub serving_description: String,
    /// FatSecret page
    #[serde(default)]
    pub serving_url: String,
    /// Metric amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub metric_serving_amount: f64,
    /// Metric unit
    #[serde(default)]
    pub metric_serving_unit: String,
    /// Number of units
    #[serde(default, deserialize_with = "lenient_f64")]
    pub number_of_units: f64,
    /// Measurement description
    #[serde(default)]
    pub measurement_description: String,
    /// Calories (kcal)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbohydrate: f64,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat: f64,
    /// Saturated fat (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub saturated_fat: f64,
    /// Fiber (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fiber: f64,
    /// Cholesterol (mg)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cholesterol: f64,
    /// Sodium (mg)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sodium: f64,
    /// Sugar (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sugar: f64,
}

impl From<WireServing> for Serving {
    fn from(serving: WireServing) -> Self {
        Self {
            id: serving.serving_id,
            description: serving.serving_description,
            url: serving.serving_url,
            metric_serving_amount: serving.metric_serving_amount,
            metric_serving_unit: serving.metric_serving_unit,
            number_of_units: serving.number_of_units,
            measurement_description: serving.measurement_description,
            calories: serving.calories,
            carbs: serving.carbohydrate,
            protein: serving.protein,
            fat: serving.fat,
            saturated_fat: serving.saturated_fat,
            fiber: serving.fiber,
            cholesterol: serving.cholesterol,
            sodium: serving.sodium,
            sugar: serving.sugar,
        }
    }
}

impl From<WireFoodDetail> for FoodDetails {
    fn from(food: WireFoodDetail) -> Self {
        Self {
            id: food.food_id,
            name: food.food_name,
            brand_name: non_empty(food.brand_name),
            servings: food
                .servings
                .and_then(|servings| servings.serving)
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(Serving::from)
                .collect(),
        }
    }
}
