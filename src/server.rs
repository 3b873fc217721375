// ABOUTME: HTTP server assembly: merges every route group and applies the middleware stack
// ABOUTME: Serves the router with axum over a tokio listener and stops on Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::middleware::{
    make_request_span, propagate_request_id_layer, set_request_id_layer, setup_cors,
};
use crate::resources::ServerResources;
use crate::routes::{
    AttributeLogRoutes, AuthRoutes, CatalogRoutes, ExperienceRoutes, HealthRoutes, StatsRoutes,
};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::future::pending;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the complete application router
///
/// Outermost first: request id assignment, tracing span, request id
/// propagation, CORS, timeout, body limit.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let config = Arc::clone(&resources.config);

    let middleware = ServiceBuilder::new()
        .layer(set_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(propagate_request_id_layer())
        .layer(setup_cors(&config.cors))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.request_timeout_secs,
        )))
        .layer(DefaultBodyLimit::disable())
        .layer(MapResponseBodyLayer::new(Body::new))
        .layer(RequestBodyLimitLayer::new(config.http.max_body_bytes));

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(StatsRoutes::routes(resources.clone()))
        .merge(ExperienceRoutes::routes(resources.clone()))
        .merge(AttributeLogRoutes::routes(resources.clone()))
        .merge(CatalogRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources))
        .layer(middleware)
}

/// Bind `http_port` on all interfaces and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let app = build_router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        // Without a signal handler the server runs until killed
        pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
