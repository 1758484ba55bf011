// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test configuration, and a scripted food source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `calorie_compass`

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use calorie_compass::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    resources::ServerResources,
    server,
};
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{Food, FoodDetails, FoodSearchPage, Serving};
use calorie_providers::FoodSource;

static INIT_LOGGER: Once = Once::new();

/// Secret used to sign tokens in tests
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-calorie-compass";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration suitable for tests: in-memory database, cheap bcrypt
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = "sqlite::memory:".to_owned();
    config.jwt.secret = TEST_JWT_SECRET.to_owned();
    config.password.bcrypt_cost = 4;
    config
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory, 1)
        .await
        .expect("Failed to create test database")
}

/// Resources wired to an in-memory database and the given food source
pub async fn create_test_resources(food_source: Arc<dyn FoodSource>) -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        food_source,
        Arc::new(test_config()),
    ))
}

/// Full application router over fresh test resources
pub async fn create_test_app(food_source: Arc<dyn FoodSource>) -> axum::Router {
    server::build_router(create_test_resources(food_source).await)
}

/// A search call observed by [`StubFoodSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub page_number: u32,
    pub max_results: u32,
}

/// Scripted food source recording every call it receives
#[derive(Default)]
pub struct StubFoodSource {
    pub fail_with: Option<String>,
    pub searches: Mutex<Vec<SearchCall>>,
    pub detail_requests: Mutex<Vec<String>>,
}

impl StubFoodSource {
    /// A source that answers every call successfully
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A source whose every call fails with an upstream error
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_owned()),
            ..Self::default()
        })
    }

    pub fn searches(&self) -> Vec<SearchCall> {
        self.searches.lock().unwrap().clone()
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests.lock().unwrap().clone()
    }

    fn check_failure(&self) -> AppResult<()> {
        self.fail_with.as_ref().map_or(Ok(()), |message| {
            Err(AppError::internal(format!("FatSecret API error: {message}")))
        })
    }
}

/// Sample food used in stubbed search results
pub fn sample_food() -> Food {
    Food {
        id: "33691".to_owned(),
        name: "Banana".to_owned(),
        brand_name: None,
        food_type: "Generic".to_owned(),
        url: "https://www.fatsecret.com/calories-nutrition/usda/banana".to_owned(),
        calories: 89.0,
        carbs: 22.84,
        protein: 1.09,
        fat: 0.33,
    }
}

#[async_trait]
impl FoodSource for StubFoodSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        max_results: u32,
    ) -> AppResult<FoodSearchPage> {
        self.searches.lock().unwrap().push(SearchCall {
            query: query.to_owned(),
            page_number,
            max_results,
        });
        self.check_failure()?;

        Ok(FoodSearchPage {
            foods: vec![sample_food()],
            total_results: 1,
        })
    }

    async fn get_food_details(&self, food_id: &str) -> AppResult<FoodDetails> {
        self.detail_requests.lock().unwrap().push(food_id.to_owned());
        self.check_failure()?;

        Ok(FoodDetails {
            id: food_id.to_owned(),
            name: "Banana".to_owned(),
            brand_name: None,
            servings: vec![Serving {
                id: "32978".to_owned(),
                description: "1 medium (7\" to 7-7/8\" long)".to_owned(),
                calories: 105.0,
                carbs: 26.95,
                protein: 1.29,
                fat: 0.39,
                ..Serving::default()
            }],
        })
    }
}
