// ABOUTME: FatSecret Platform API integration
// ABOUTME: Client, token cache, OAuth1 signer, wire decoding, and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// API client and configuration
pub mod client;
/// Client error taxonomy
pub mod error;
/// OAuth1 HMAC-SHA1 signing
pub mod oauth1;
/// OAuth2 bearer token cache
pub mod token;
/// Response wire formats
pub mod wire;

pub use client::{FatSecretClient, FatSecretConfig, FatSecretCredentials, RequestAuth};
pub use error::FatSecretError;
pub use oauth1::{OAuth1Credentials, OAuth1Signature};
pub use token::{BearerToken, TokenCache, TokenGrant};
