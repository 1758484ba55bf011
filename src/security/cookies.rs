// ABOUTME: Session cookie helpers for the server-rendered pages
// ABOUTME: Reads cookies from request headers and builds Set-Cookie values for the auth token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::{header::COOKIE, HeaderMap};
use calorie_core::constants::auth::{AUTH_COOKIE_MAX_AGE_SECS, AUTH_COOKIE_NAME};

/// Find a cookie by name across all `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing a session token
#[must_use]
pub fn auth_cookie(token: &str) -> String {
    format!("{AUTH_COOKIE_NAME}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={AUTH_COOKIE_MAX_AGE_SECS}")
}

/// `Set-Cookie` value expiring the session cookie
#[must_use]
pub fn clear_auth_cookie() -> String {
    format!("{AUTH_COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}
