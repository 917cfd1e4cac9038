use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sage_server::{app, AppState};
use sage_voice::{LiveKitConfig, TokenService};
use std::sync::Arc;
use tower::ServiceExt;

fn setup_app(allowed_origins: Vec<String>) -> axum::Router {
    let state = AppState {
        token_service: Arc::new(TokenService::new(LiveKitConfig::new(
            "http://localhost:7880",
            "devkey",
            "secret",
        ))),
        allowed_origins,
    };
    app(state)
}

#[tokio::test]
async fn allowed_origin_is_echoed_back() {
    let app = setup_app(vec!["https://app.example.com".to_string()]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://app.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://app.example.com")
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn disallowed_origin_gets_no_cors_header() {
    let app = setup_app(vec!["https://app.example.com".to_string()]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The request still succeeds; the browser enforces the missing header.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn empty_origin_list_allows_any_origin() {
    let app = setup_app(Vec::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://anywhere.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn preflight_for_allowed_origin_succeeds() {
    let app = setup_app(vec!["https://app.example.com".to_string()]);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/token")
                .header(header::ORIGIN, "https://app.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://app.example.com")
    );
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("GET"));
}
