// ABOUTME: HTTP client construction for provider API calls
// ABOUTME: Builds pooled reqwest clients with a fixed request timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connection establishment timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Build an HTTP client whose requests abort after `timeout`
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .build()
}
