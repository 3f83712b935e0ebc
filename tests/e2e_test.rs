//! End-to-end flow through the HTTP API.
//!
//! Walks the integrator's path: discover events, register webhooks,
//! exercise a business operation that fans out notifications, verify the
//! ping report, then unregister and confirm the registry round-trips.

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

#[tokio::test]
async fn full_registration_notification_lifecycle() {
    let receiver_a = MockServer::start().await;
    let receiver_b = MockServer::start().await;

    for receiver in [&receiver_a, &receiver_b] {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/webhook"))
            .respond_with(ResponseTemplate::new(200))
            .mount(receiver)
            .await;
    }

    let app = app();

    // The integrator discovers registrable events.
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/webhooks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["webhooks"].as_array().unwrap().len(), 6);

    // Both receivers subscribe to user_registered.
    for receiver in [&receiver_a, &receiver_b] {
        let payload =
            json!({"event": "user_registered", "url": format!("{}/webhook", receiver.uri())});
        let response =
            app.clone().oneshot(json_request("POST", "/webhook", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // A user registers; the business response is immediate.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", json!({"username": "alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Both receivers get the notification (fire-and-forget, so poll).
    for receiver in [&receiver_a, &receiver_b] {
        let mut delivered = false;
        for _ in 0..50 {
            let requests = receiver.received_requests().await.unwrap_or_default();
            if requests.iter().any(|r| {
                serde_json::from_slice::<Value>(&r.body)
                    .is_ok_and(|body| body["username"] == "alice")
            }) {
                delivered = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(delivered, "receiver should get the user_registered payload");
    }

    // Ping reports both subscribers attempted and succeeded.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/ping?event_filter=user_registered",
            json!({"message": "verification ping"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["attempted"], 2);
    assert_eq!(report["succeeded"], 2);
    assert_eq!(report["failed"], 0);

    // Unregister both; the filtered listing goes back to not-found.
    for receiver in [&receiver_a, &receiver_b] {
        let payload =
            json!({"event": "user_registered", "url": format!("{}/webhook", receiver.uri())});
        let response =
            app.clone().oneshot(json_request("DELETE", "/webhook", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/webhooks?event_filter=user_registered")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
