//! Common test utilities for integration tests
//!
//! Builds the real router with an HTTP prediction client pointed at a
//! wiremock server standing in for the prediction service.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use diacheck_backend::{
    config::{AppConfig, PredictionConfig, ServerConfig},
    routes,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub prediction: MockServer,
}

impl TestApp {
    /// Create a new test application backed by a fresh mock prediction service
    pub async fn new() -> Self {
        let prediction = MockServer::start().await;
        let app = app_for(&prediction.uri());
        Self { app, prediction }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        send(&self.app, request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        send(&self.app, request).await
    }

    /// POST and parse the response as JSON
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let (status, text) = self.post(path, &body.to_string()).await;
        let json = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Router whose prediction client targets `api_base`
pub fn app_for(api_base: &str) -> Router {
    let state = AppState::from_config(&test_config(api_base)).expect("Failed to build test state");
    routes::create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}

fn test_config(api_base: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        prediction: PredictionConfig {
            api_base: api_base.to_string(),
            request_timeout_secs: Some(5),
        },
    }
}

/// Quick-form body from the reference scenario
pub fn quick_form() -> Value {
    serde_json::json!({
        "age": "45",
        "gender": "Female",
        "height": "160",
        "weight": "60",
        "hypertension": "0",
        "heartDisease": "0",
        "smokingHistory": "never"
    })
}

/// Full-form body from the reference scenario
pub fn full_form() -> Value {
    let mut form = quick_form();
    form["hba1c"] = Value::from("6.2");
    form["bloodGlucose"] = Value::from("120");
    form
}
