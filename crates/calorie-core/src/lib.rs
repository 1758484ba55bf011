// ABOUTME: Core types and constants for the CalorieCompass nutrition backend
// ABOUTME: Foundation crate with error handling, constants, and domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Core
//!
//! Shared types for the CalorieCompass workspace. Both the provider crate and
//! the server depend on it, so it changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Upstream endpoints and request defaults
//! - **models**: Food, serving, and user data structures

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Food, Serving, User, request payloads)
pub mod models;
