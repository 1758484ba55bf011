// ABOUTME: Core data models for the CalorieCompass API
// ABOUTME: Re-exports food, serving, and user account structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Provider-agnostic projections of nutrition data plus the user account
//! types exchanged over the JSON API.

mod food;
mod user;

pub use food::{Food, FoodDetails, FoodSearchPage, FoodSearchRequest, FoodSearchResponse, Serving};
pub use user::{AuthResponse, User, UserLogin, UserResponse, UserSignUp};
