// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Upstream endpoints, auth parameters, and request defaults for CalorieCompass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat namespace.

/// FatSecret Platform API endpoints and protocol values
pub mod fatsecret {
    /// REST method dispatch endpoint
    pub const API_BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";
    /// OAuth2 token endpoint
    pub const TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
    /// Request timeout for every outbound call
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Seconds subtracted from a token's stated lifetime
    pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;
    /// OAuth2 grant type
    pub const GRANT_TYPE: &str = "client_credentials";
    /// OAuth2 scope
    pub const SCOPE: &str = "basic";
    /// Response format requested from the API
    pub const FORMAT_JSON: &str = "json";

    /// API method names
    pub mod methods {
        /// Food search by expression
        pub const FOODS_SEARCH: &str = "foods.search";
        /// Food detail lookup by id
        pub const FOOD_GET: &str = "food.get";
    }

    /// OAuth1 protocol values
    pub mod oauth1 {
        /// Signature method
        pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
        /// Protocol version
        pub const VERSION: &str = "1.0";
    }
}

/// Food search request defaults
pub mod food {
    /// Default zero-based result page
    pub const DEFAULT_PAGE: u32 = 0;
    /// Default page size
    pub const DEFAULT_LIMIT: u32 = 50;
}

/// User account rules
pub mod auth {
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Default bcrypt work factor
    pub const DEFAULT_BCRYPT_COST: u32 = 12;
    /// Lowest bcrypt cost accepted by the algorithm
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt cost accepted by the algorithm
    pub const MAX_BCRYPT_COST: u32 = 31;
    /// Default JWT lifetime
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Longest JWT lifetime accepted from configuration (one year)
    pub const MAX_JWT_EXPIRY_HOURS: i64 = 8_760;
    /// Name of the browser session cookie
    pub const AUTH_COOKIE_NAME: &str = "auth_token";
    /// Browser session cookie lifetime
    pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 86_400;
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Versioned API prefix
    pub const API_V1: &str = "/api/v1";
}

/// Service identity
pub mod service {
    /// Default application name
    pub const APP_NAME: &str = "calorie-compass";
    /// Crate version reported by health checks
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
