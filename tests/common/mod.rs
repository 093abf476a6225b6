#![allow(dead_code)]

use actix_web::web;
use codegenius_gateway::config::{FailurePolicy, GatewayConfig};
use codegenius_gateway::server::AppState;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-test-key";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Gateway config pointed at a stub backend.
pub fn test_config(
    backend: &MockServer,
    api_key: Option<&str>,
    failure_policy: FailurePolicy,
) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.failure_policy = failure_policy;
    config.upstream.api_key = api_key.map(str::to_string);
    config.upstream.api_base = format!("{}/v1", backend.uri());
    config.upstream.request_timeout_secs = 10;
    config
}

pub fn app_state(config: &GatewayConfig) -> web::Data<AppState> {
    web::Data::new(AppState::new(config).expect("Failed to create AppState in test"))
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "gen-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Stub backend that answers every completion with `content`.
pub async fn echo_backend(content: &str, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

/// Stub backend that must never be called.
pub async fn untouched_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

/// Bodies the backend received, decoded as JSON.
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.body_json::<Value>().expect("request body is JSON"))
        .collect()
}
