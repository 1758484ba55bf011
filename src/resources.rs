// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Holds the database, auth helpers, nutrition provider, and loaded configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Server Resources
//!
//! Built once at startup and shared with every router as `Arc<ServerResources>`.

use std::sync::Arc;

use calorie_providers::FoodSource;

use crate::auth::{AuthManager, PasswordHasher};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::{AuthService, FoodService};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// User store
    pub database: Database,
    /// JWT issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// bcrypt hasher
    pub password_hasher: PasswordHasher,
    /// Nutrition data provider
    pub food_source: Arc<dyn FoodSource>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources from configuration and already-opened backends
    #[must_use]
    pub fn new(
        database: Database,
        food_source: Arc<dyn FoodSource>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.jwt.secret.as_bytes(),
            config.jwt.expiration_hours,
        ));
        let password_hasher = PasswordHasher::new(config.password.bcrypt_cost);

        Self {
            database,
            auth_manager,
            password_hasher,
            food_source,
            config,
        }
    }

    /// Account service over these resources
    #[must_use]
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.database.clone(),
            self.auth_manager.clone(),
            self.password_hasher,
        )
    }

    /// Food service over these resources
    #[must_use]
    pub fn food_service(&self) -> FoodService {
        FoodService::new(self.food_source.clone())
    }
}
