//! Token endpoint handlers.

use crate::AppState;
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

fn default_room() -> String {
    "avatar-room".to_string()
}

/// Query parameters for `GET /token`.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Participant identity embedded in the token.
    pub identity: String,
    /// Base room name; each request gets a fresh uuid-suffixed room.
    #[serde(default = "default_room")]
    pub room: String,
}

/// Response body for a minted token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub server_url: String,
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    /// The uniform failure response: detail goes to the logs, the client
    /// only sees a generic message.
    fn internal() -> Self {
        Self::InternalServerError("an unexpected error occurred".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Handler for `GET /token?identity=<string>&room=<string>`.
///
/// Mints a LiveKit join token for a uuid-suffixed room and returns it with
/// the browser-facing server URL.
pub async fn get_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, ApiError> {
    if params.identity.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "identity must not be empty".to_string(),
        ));
    }

    // Each join lands in a fresh room so stale participants never collide.
    let room_name = format!("{}-{}", params.room, Uuid::new_v4());

    if !state.token_service.is_enabled() {
        tracing::error!("token request failed: LiveKit credentials are not configured");
        return Err(ApiError::internal());
    }

    let token = state
        .token_service
        .generate_join_token(&room_name, &params.identity, &params.identity)
        .map_err(|e| {
            tracing::error!(identity = %params.identity, room = %room_name, "token minting failed: {}", e);
            ApiError::internal()
        })?;

    tracing::debug!(identity = %params.identity, room = %room_name, "minted join token");

    Ok(Json(TokenResponse {
        token,
        server_url: state.token_service.get_public_url().to_string(),
    }))
}
