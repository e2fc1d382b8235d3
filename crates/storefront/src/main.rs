//! BytTech storefront - public e-commerce site.
//!
//! This binary serves the server-rendered shop on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, plain HTML forms for all interactivity
//! - Askama templates for server-side rendering
//! - Demo catalog generated in memory at startup
//! - tower-sessions (in-memory store) for cart, theme and consent state
//!
//! The pages ship no JavaScript. Every click that changes state is a
//! form POST plus redirect; every view is a full server render.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use byttech_storefront::config::StorefrontConfig;
use byttech_storefront::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use byttech_storefront::routes;
use byttech_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "byttech_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build application state (generates the demo catalog)
    let state = AppState::new(config.clone());
    tracing::info!(products = state.catalog().len(), "Catalog generated");

    // Create session layer
    let session_layer = create_session_layer(state.config());

    // Build router. The static file service is registered after the
    // security headers middleware so the hashed stylesheet and images
    // escape the no-store cache policy that page responses carry.
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .fallback(routes::not_found)
        .layer(from_fn(security_headers_middleware))
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
