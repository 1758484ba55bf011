// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates YAML loading, ${VAR} expansion, env overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io::Write;
use std::time::Duration;

use calorie_compass::config::{DatabaseUrl, LogLevel, ServerConfig};
use serial_test::serial;

const OVERRIDE_VARS: &[&str] = &[
    "HTTP_PORT",
    "LOG_LEVEL",
    "DATABASE_URL",
    "CONNECTION_STRING",
    "DATABASE_POOL_MAX",
    "JWT_SECRET",
    "JWT_EXPIRATION_HOURS",
    "BCRYPT_COST",
    "FATSECRET_CLIENT_ID",
    "FATSECRET_CLIENT_SECRET",
    "FATSECRET_CONSUMER_KEY",
    "FATSECRET_CONSUMER_SECRET",
    "FATSECRET_BASE_URL",
    "FATSECRET_TOKEN_URL",
    "CC_TEST_SECRET",
];

fn clear_env() {
    for key in OVERRIDE_VARS {
        env::remove_var(key);
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const SAMPLE: &str = r#"
http:
  port: 9090
logger:
  log_level: debug
database:
  url: "sqlite::memory:"
  pool_max: 3
jwt:
  secret: "${CC_TEST_SECRET}"
  expiration_hours: 12
password:
  bcrypt_cost: 10
fatsecret:
  client_id: id-from-file
  client_secret: secret-from-file
  consumer_key: key-from-file
  consumer_secret: consumer-secret-from-file
  timeout_secs: 7
"#;

#[test]
#[serial]
fn test_load_yaml_with_env_expansion() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "expanded-secret");
    let file = write_config(SAMPLE);

    let config = ServerConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.http.port, 9090);
    assert_eq!(config.logger.log_level, LogLevel::Debug);
    assert_eq!(config.database.pool_max, 3);
    assert_eq!(config.database_url().unwrap(), DatabaseUrl::Memory);
    assert_eq!(config.jwt.secret, "expanded-secret");
    assert_eq!(config.jwt.expiration_hours, 12);
    assert_eq!(config.password.bcrypt_cost, 10);

    let fatsecret = config.fatsecret_config();
    assert_eq!(fatsecret.credentials.client_id, "id-from-file");
    assert_eq!(fatsecret.credentials.consumer_key, "key-from-file");
    assert_eq!(fatsecret.timeout, Duration::from_secs(7));
    assert_eq!(
        fatsecret.base_url,
        "https://platform.fatsecret.com/rest/server.api"
    );
    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_take_precedence() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "from-file");
    env::set_var("JWT_SECRET", "from-env");
    env::set_var("HTTP_PORT", "7070");
    env::set_var("CONNECTION_STRING", "sqlite:./tmp/override.db");
    env::set_var("FATSECRET_CLIENT_ID", "env-client");
    env::set_var("FATSECRET_TOKEN_URL", "http://127.0.0.1:9/token");
    let file = write_config(SAMPLE);

    let config = ServerConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.jwt.secret, "from-env");
    assert_eq!(config.http.port, 7070);
    assert_eq!(config.database.url, "sqlite:./tmp/override.db");
    assert_eq!(config.fatsecret.client_id, "env-client");
    assert_eq!(config.fatsecret.token_url, "http://127.0.0.1:9/token");
    clear_env();
}

#[test]
#[serial]
fn test_database_url_wins_over_connection_string() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "s");
    env::set_var("DATABASE_URL", "sqlite:./primary.db");
    env::set_var("CONNECTION_STRING", "sqlite:./secondary.db");
    let file = write_config(SAMPLE);

    let config = ServerConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.database.url, "sqlite:./primary.db");
    clear_env();
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    env::set_var("JWT_SECRET", "only-env");
    let dir = tempfile::tempdir().unwrap();

    let config = ServerConfig::load(Some(&dir.path().join("absent.yml"))).unwrap();

    assert_eq!(config.http.port, 8080);
    assert_eq!(config.jwt.expiration_hours, 24);
    assert_eq!(config.password.bcrypt_cost, 12);
    assert_eq!(config.jwt.secret, "only-env");
    clear_env();
}

#[test]
#[serial]
fn test_missing_secret_fails_validation() {
    clear_env();
    let file = write_config(SAMPLE);

    assert!(ServerConfig::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_invalid_numeric_override_is_error() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "s");
    env::set_var("HTTP_PORT", "eighty");
    let file = write_config(SAMPLE);

    assert!(ServerConfig::load(Some(file.path())).is_err());
    clear_env();
}

#[test]
#[serial]
fn test_postgres_url_is_rejected() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "s");
    env::set_var("DATABASE_URL", "postgres://localhost/calories");
    let file = write_config(SAMPLE);

    assert!(ServerConfig::load(Some(file.path())).is_err());
    clear_env();
}

#[test]
fn test_summary_hides_secrets() {
    let mut config = ServerConfig::default();
    config.jwt.secret = "super-secret-value".to_owned();
    config.fatsecret.client_secret = "fatsecret-secret".to_owned();

    let summary = config.summary();
    let debug = format!("{config:?}");

    assert!(!summary.contains("super-secret-value"));
    assert!(!debug.contains("super-secret-value"));
    assert!(!debug.contains("fatsecret-secret"));
}

#[test]
#[serial]
fn test_oversized_jwt_expiration_is_rejected() {
    clear_env();
    env::set_var("CC_TEST_SECRET", "s");
    env::set_var("JWT_EXPIRATION_HOURS", "10000000000");
    let file = write_config(SAMPLE);

    assert!(ServerConfig::load(Some(file.path())).is_err());
    clear_env();
}
