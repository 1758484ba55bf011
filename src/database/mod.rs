// ABOUTME: Database connection management and schema migrations
// ABOUTME: Wraps a SQLite pool sized from configuration and runs idempotent migrations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Database Management
//!
//! User accounts live in SQLite. The schema is created on startup with
//! `CREATE TABLE IF NOT EXISTS`, so opening an existing database is safe.

mod users;

use calorie_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::config::DatabaseUrl;

/// Database manager for user storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// In-memory databases are pinned to a single connection that never
    /// expires, since every new connection would see an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn new(database_url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        let pool = match database_url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(SqliteConnectOptions::new().in_memory(true))
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }

                SqlitePoolOptions::new()
                    .max_connections(max_connections.max(1))
                    .connect_with(
                        SqliteConnectOptions::new()
                            .filename(path)
                            .create_if_missing(true),
                    )
                    .await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {database_url}");

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await
    }
}
