//! Sage token server library logic.

pub mod api_token;
pub mod config;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Json, Router,
};
use sage_voice::TokenService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all request handlers.
pub struct AppState {
    /// LiveKit token minting service.
    pub token_service: Arc<TokenService>,
    /// Origins allowed to call the API. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the CORS layer from the configured origin list.
///
/// An empty list allows any origin (development mode); a non-empty list
/// restricts to those origins and allows credentials, matching what the
/// browser client sends when joining a call.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "skipping unparseable allowed origin: {}", e);
                None
            }
        })
        .collect();

    // Wildcards cannot be combined with credentials, so the restricted
    // branch names its methods and headers explicitly.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/health", get(health))
        .route("/token", get(api_token::get_token_handler))
        .layer(cors)
        .layer(Extension(Arc::new(state)))
}
