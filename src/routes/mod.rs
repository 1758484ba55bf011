// ABOUTME: Route module organization for CalorieCompass HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for CalorieCompass
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Authentication routes (sign-up and login)
pub mod auth;
/// Food search and detail routes
pub mod food;
/// Health check routes
pub mod health;
/// Current-user routes
pub mod user;
/// Server-rendered HTML pages
pub mod web;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Food route handlers
pub use food::FoodRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// User route handlers
pub use user::UserRoutes;
/// HTML page route handlers
pub use web::WebRoutes;
