use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use sage_server::{api_token::TokenResponse, app, AppState};
use sage_voice::{LiveKitConfig, TokenService};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const TEST_SECRET: &str = "secret";

fn setup_app(livekit: LiveKitConfig) -> axum::Router {
    let state = AppState {
        token_service: Arc::new(TokenService::new(livekit)),
        allowed_origins: Vec::new(),
    };
    app(state)
}

fn configured_livekit() -> LiveKitConfig {
    let mut config = LiveKitConfig::new("http://localhost:7880", "devkey", TEST_SECRET);
    config.public_url = "wss://voice.example.com".to_string();
    config
}

#[derive(serde::Deserialize)]
struct Claims {
    sub: String,
    video: VideoClaims,
}

#[derive(serde::Deserialize)]
struct VideoClaims {
    room: String,
    #[serde(rename = "roomJoin")]
    room_join: bool,
}

fn decode_token(token: &str) -> Claims {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(TEST_SECRET.as_bytes());
    decode::<Claims>(token, &key, &validation).unwrap().claims
}

#[tokio::test]
async fn token_success_returns_token_and_server_url() {
    let app = setup_app(configured_livekit());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/token?identity=learner-1&room=math")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: TokenResponse = serde_json::from_slice(&body).unwrap();
    assert!(!parsed.token.is_empty());
    assert_eq!(parsed.server_url, "wss://voice.example.com");

    let claims = decode_token(&parsed.token);
    assert_eq!(claims.sub, "learner-1");
    assert!(claims.video.room_join);
    assert!(claims.video.room.starts_with("math-"));
}

#[tokio::test]
async fn granted_room_gets_a_fresh_uuid_suffix() {
    let app = setup_app(configured_livekit());

    let mut rooms = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/token?identity=learner-1&room=math")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: TokenResponse = serde_json::from_slice(&body).unwrap();
        let claims = decode_token(&parsed.token);

        let suffix = claims.video.room.strip_prefix("math-").unwrap().to_string();
        uuid::Uuid::parse_str(&suffix).expect("room suffix should be a uuid");
        rooms.push(claims.video.room);
    }

    assert_ne!(rooms[0], rooms[1], "each join should get its own room");
}

#[tokio::test]
async fn room_defaults_to_avatar_room() {
    let app = setup_app(configured_livekit());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/token?identity=learner-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: TokenResponse = serde_json::from_slice(&body).unwrap();
    let claims = decode_token(&parsed.token);
    assert!(claims.video.room.starts_with("avatar-room-"));
}

#[tokio::test]
async fn missing_identity_is_a_bad_request() {
    let app = setup_app(configured_livekit());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/token?room=math")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_identity_is_a_bad_request() {
    let app = setup_app(configured_livekit());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/token?identity=%20&room=math")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unconfigured_livekit_returns_generic_500() {
    let app = setup_app(LiveKitConfig::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/token?identity=learner-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "an unexpected error occurred");
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = setup_app(configured_livekit());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
