// ABOUTME: Main library entry point for the CalorieCompass nutrition tracking server
// ABOUTME: Provides user accounts, FatSecret-backed food search, and HTML pages over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # CalorieCompass
//!
//! A calorie tracking backend that looks up nutrition data through the
//! FatSecret Platform API and keeps user accounts in SQLite.
//!
//! ## Architecture
//!
//! - **Providers** (`calorie-providers`): the FatSecret client, its OAuth2
//!   token cache, and the OAuth1 signing fallback
//! - **Core** (`calorie-core`): shared models, constants, and `AppError`
//! - **Services**: account and food logic shared by every route
//! - **Routes**: JSON API under `/api/v1` and at the root, plus HTML pages
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use calorie_compass::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?;
//! println!("CalorieCompass configured with port: HTTP={}", config.http.port);
//! # Ok(())
//! # }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary and integration tests (tests/).

/// JWT sessions and bcrypt password hashing
pub mod auth;

/// Configuration loading
pub mod config;

/// SQLite user storage
pub mod database;

/// Structured logging setup
pub mod logging;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Cookie helpers
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Domain service layer
pub mod services;

pub use calorie_core::{constants, errors, models};
