// ABOUTME: OAuth1 HMAC-SHA1 request signing for the FatSecret fallback path
// ABOUTME: Pure functions for encoding, base string construction, and Authorization headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Two-legged OAuth 1.0 signing (RFC 5849, HMAC-SHA1).
//!
//! Everything here is deterministic given a timestamp and nonce, so signatures
//! can be checked against fixed vectors. Only [`NonceSource`] touches the clock.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use ring::hmac;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::fatsecret::oauth1::{SIGNATURE_METHOD, VERSION};

/// Consumer key pair used for OAuth1 signing
#[derive(Debug, Clone, Default)]
pub struct OAuth1Credentials {
    /// Consumer key
    pub consumer_key: String,
    /// Consumer secret
    pub consumer_secret: String,
}

/// The complete set of `oauth_*` parameters for one signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth1Signature {
    params: BTreeMap<String, String>,
}

impl OAuth1Signature {
    /// The base64 HMAC-SHA1 signature
    #[must_use]
    pub fn signature(&self) -> &str {
        self.params
            .get("oauth_signature")
            .map_or("", String::as_str)
    }

    /// Look up one `oauth_*` parameter
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// `OAuth k="v", ...` with every value percent-encoded, keys in sorted order
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let fields: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }
}

/// RFC 3986 percent-encoding: unreserved characters pass, all else becomes `%XX`
#[must_use]
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Encode every pair, join as `key=value`, sort on the encoded pair, join with `&`
#[must_use]
pub fn parameter_string<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                percent_encode(key.as_ref()),
                percent_encode(value.as_ref())
            )
        })
        .collect();
    pairs.sort_unstable();
    pairs.join("&")
}

/// `UPPER(method) & enc(base_url) & enc(parameter_string)`
#[must_use]
pub fn signature_base_string(method: &str, base_url: &str, parameter_string: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(parameter_string)
    )
}

/// `enc(consumer_secret) & enc(token_secret)`; two-legged requests pass an empty token secret
#[must_use]
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Standard base64 of HMAC-SHA1(key, message)
#[must_use]
pub fn hmac_sha1_base64(key: &str, message: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
    let tag = hmac::sign(&key, message.as_bytes());
    general_purpose::STANDARD.encode(tag.as_ref())
}

/// Sign a request whose business parameters are `params`
///
/// The returned signature carries the `oauth_*` control parameters plus
/// `oauth_signature`. Business parameters are not included; they travel in the
/// query string.
#[must_use]
pub fn sign_request<K, V>(
    method: &str,
    base_url: &str,
    params: &[(K, V)],
    credentials: &OAuth1Credentials,
    timestamp: i64,
    nonce: &str,
) -> OAuth1Signature
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut oauth_params = BTreeMap::new();
    oauth_params.insert(
        "oauth_consumer_key".to_owned(),
        credentials.consumer_key.clone(),
    );
    oauth_params.insert(
        "oauth_signature_method".to_owned(),
        SIGNATURE_METHOD.to_owned(),
    );
    oauth_params.insert("oauth_timestamp".to_owned(), timestamp.to_string());
    oauth_params.insert("oauth_nonce".to_owned(), nonce.to_owned());
    oauth_params.insert("oauth_version".to_owned(), VERSION.to_owned());

    let mut all_params: Vec<(&str, &str)> = params
        .iter()
        .map(|(key, value)| (key.as_ref(), value.as_ref()))
        .collect();
    all_params.extend(
        oauth_params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    let base_string = signature_base_string(method, base_url, &parameter_string(&all_params));
    let signature = hmac_sha1_base64(&signing_key(&credentials.consumer_secret, ""), &base_string);

    oauth_params.insert("oauth_signature".to_owned(), signature);
    OAuth1Signature {
        params: oauth_params,
    }
}

/// Per-request nonces: nanosecond clock plus a process-wide counter
#[derive(Debug, Default)]
pub struct NonceSource {
    counter: AtomicU64,
}

impl NonceSource {
    /// Create a nonce source
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// A nonce not returned before by this source
    pub fn next_nonce(&self) -> String {
        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros());
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{nanos}{sequence:04}")
    }
}
