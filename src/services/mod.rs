// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Provides protocol-agnostic services shared by the JSON API and HTML pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! This module contains protocol-agnostic business logic extracted from route handlers.
//! The JSON API and the server-rendered pages both go through these services, so
//! validation and error mapping are identical regardless of the entry point.

/// Account registration, login, and session lookup
pub mod auth;

/// Food search and detail lookups against the nutrition provider
pub mod food;

pub use auth::AuthService;
pub use food::FoodService;
