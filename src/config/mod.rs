// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads YAML configuration with environment variable expansion and overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the CalorieCompass server
//!
//! - **Environment**: YAML file, `.env`, and environment variable overrides

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AppInfo, DatabaseConfig, DatabaseUrl, FatSecretSettings, HttpConfig, JwtConfig, LogLevel,
    LoggerConfig, PasswordConfig, ServerConfig, DEFAULT_CONFIG_PATH,
};
