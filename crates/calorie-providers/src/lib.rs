// ABOUTME: Nutrition data provider implementations for CalorieCompass
// ABOUTME: FoodSource trait, shared HTTP client factory, and the FatSecret Platform client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition data providers and the abstraction the server depends on.
//!
//! The server only sees [`FoodSource`]. [`fatsecret::FatSecretClient`] is the
//! production implementation.

// Re-export calorie-core modules so provider code can keep `use crate::errors::*`
pub use calorie_core::constants;
pub use calorie_core::errors;
pub use calorie_core::models;

/// Core provider trait
pub mod core;
/// FatSecret Platform API client
pub mod fatsecret;
/// HTTP client construction for provider API calls
pub mod http_client;

pub use core::FoodSource;
pub use fatsecret::{
    FatSecretClient, FatSecretConfig, FatSecretCredentials, FatSecretError, RequestAuth,
};
pub use http_client::client_with_timeout;
