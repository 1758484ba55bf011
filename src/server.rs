// ABOUTME: HTTP server assembly and lifecycle for CalorieCompass
// ABOUTME: Builds the axum router, binds the listener, and shuts down on Ctrl-C or SIGTERM
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # HTTP Server
//!
//! The JSON API is mounted twice, under `/api/v1` and at the root. The HTML
//! pages and the health check are mounted at the root only.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use calorie_core::constants::endpoints;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, FoodRoutes, HealthRoutes, UserRoutes, WebRoutes};

/// JSON API routes without a prefix
fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(FoodRoutes::routes(resources.clone()))
}

/// Assemble the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .nest(endpoints::API_V1, api_routes(&resources))
        .merge(api_routes(&resources))
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(WebRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}

/// Serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

    serve(listener, resources).await
}

/// Serve on an already-bound listener until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve(listener: TcpListener, resources: Arc<ServerResources>) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
