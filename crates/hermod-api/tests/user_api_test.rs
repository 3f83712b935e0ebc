//! Integration tests for the user and message endpoints.
//!
//! Covers the business validations and, critically, that business
//! operations succeed regardless of notification outcome while still
//! triggering delivery to registered subscribers.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use hermod_api::{create_router, AppState};

fn app() -> Router {
    let state = AppState::with_defaults().expect("default delivery config is valid");
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request is valid")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Waits until the mock server has seen `expected` requests, or times out.
/// Notification delivery is fire-and-forget, so the response returns
/// before the webhook call lands.
async fn wait_for_requests(server: &MockServer, expected: usize) {
    for _ in 0..50 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("mock server did not receive {expected} request(s) in time");
}

#[tokio::test]
async fn register_user_lowercases_username() {
    let app = app();

    let response =
        app.oneshot(json_request("POST", "/users", json!({"username": "Alice"}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body["registered_at"].is_string());
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", json!({"username": "alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Case-insensitive: "ALICE" collides with "alice".
    let response =
        app.oneshot(json_request("POST", "/users", json!({"username": "ALICE"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_registration_notifies_subscribers() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/hook"))
        .and(matchers::body_partial_json(json!({"username": "alice"})))
        .and(matchers::header("X-Hermod-Event", "user_registered"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app();
    let payload = json!({"event": "user_registered", "url": format!("{}/hook", mock_server.uri())});
    app.clone().oneshot(json_request("POST", "/webhook", payload)).await.unwrap();

    let response =
        app.oneshot(json_request("POST", "/users", json!({"username": "alice"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    wait_for_requests(&mock_server, 1).await;
}

#[tokio::test]
async fn registration_succeeds_when_subscriber_is_unreachable() {
    let app = app();

    // Nothing listens on port 1; delivery will fail, registration must not.
    let payload = json!({"event": "user_registered", "url": "http://127.0.0.1:1/hook"});
    app.clone().oneshot(json_request("POST", "/webhook", payload)).await.unwrap();

    let response =
        app.oneshot(json_request("POST", "/users", json!({"username": "alice"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn send_message_validations() {
    let app = app();

    for username in ["alice", "bob"] {
        app.clone()
            .oneshot(json_request("POST", "/users", json!({"username": username})))
            .await
            .unwrap();
    }

    // Unknown sender.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/messages",
            json!({"sender": "mallory", "recipient": "alice", "subject": "hi", "message": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Sender does not exist");

    // Unknown recipient.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/messages",
            json!({"sender": "bob", "recipient": "mallory", "subject": "hi", "message": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Sender and recipient must differ.
    let response = app
        .oneshot(json_request(
            "POST",
            "/users/messages",
            json!({"sender": "bob", "recipient": "Bob", "subject": "hi", "message": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Sender and recipient cannot be the same");
}

#[tokio::test]
async fn message_sending_notifies_subscribers() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::header("X-Hermod-Event", "user_send_message"))
        .and(matchers::body_partial_json(json!({"sender": "bob", "recipient": "alice"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app();
    let payload =
        json!({"event": "user_send_message", "url": format!("{}/hook", mock_server.uri())});
    app.clone().oneshot(json_request("POST", "/webhook", payload)).await.unwrap();

    for username in ["alice", "bob"] {
        app.clone()
            .oneshot(json_request("POST", "/users", json!({"username": username})))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(json_request(
            "POST",
            "/users/messages",
            json!({"sender": "bob", "recipient": "alice", "subject": "Welcome!", "message": "hi"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    wait_for_requests(&mock_server, 1).await;
}

#[tokio::test]
async fn messages_listed_per_recipient() {
    let app = app();

    for username in ["alice", "bob", "carol"] {
        app.clone()
            .oneshot(json_request("POST", "/users", json!({"username": username})))
            .await
            .unwrap();
    }

    for (recipient, subject) in [("alice", "one"), ("alice", "two"), ("carol", "three")] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/users/messages",
                json!({"sender": "bob", "recipient": recipient, "subject": subject, "message": "x"}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder().uri("/users/messages?recipient=alice").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["recipient"] == "alice"));

    // Unknown recipient is a validation failure.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/messages?recipient=mallory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
