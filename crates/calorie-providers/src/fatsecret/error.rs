// ABOUTME: Error taxonomy for the FatSecret client
// ABOUTME: Distinguishes token exchange, upstream HTTP, API, decode, and transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::errors::{AppError, ErrorCode};

/// Failures raised while talking to FatSecret
#[derive(Debug, Error)]
pub enum FatSecretError {
    /// The OAuth2 client-credentials exchange failed
    ///
    /// Never surfaced by request operations; it triggers the OAuth1 fallback.
    #[error("token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// The nutrition API answered with a non-200 status
    #[error("FatSecret API returned HTTP {status}: {body}")]
    UpstreamHttp {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The nutrition API answered 200 with an error envelope
    #[error("FatSecret API error {code}: {message}")]
    Api {
        /// FatSecret error code
        code: i64,
        /// FatSecret error message
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("failed to decode FatSecret response: {0}")]
    Decode(String),

    /// Network-level failure or timeout
    #[error("FatSecret transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<FatSecretError> for AppError {
    fn from(error: FatSecretError) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_maps_to_internal() {
        let error = FatSecretError::UpstreamHttp {
            status: 403,
            body: "forbidden".into(),
        };
        let app_error = AppError::from(error);

        assert_eq!(app_error.code, ErrorCode::InternalError);
        assert_eq!(app_error.http_status(), 500);
        assert!(app_error.message.contains("403"));
    }
}
