//! Gemini provider tests against a local stub of the Gemini models API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use onboarding_service::config::OnboardingConfig;
use onboarding_service::services::gateway::SERVICE_UNREACHABLE_MESSAGE;
use onboarding_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use onboarding_service::services::providers::{ProviderError, TextProvider};
use onboarding_service::startup::Application;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Captured {
    action: String,
    key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn generate_content(
    State(state): State<StubState>,
    Path(action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(Captured {
        action,
        key: query.get("key").cloned(),
        body,
    });
    (state.status, Json(state.reply.clone()))
}

async fn list_models(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(Captured {
        action: "list".to_string(),
        key: query.get("key").cloned(),
        body: Value::Null,
    });
    (state.status, Json(state.reply.clone()))
}

/// Serve a stub Gemini API and return its base URL plus captured requests.
async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply,
        captured: captured.clone(),
    };

    let router = Router::new()
        .route("/models", get(list_models))
        .route("/models/:action", post(generate_content))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    (format!("http://127.0.0.1:{}", port), captured)
}

fn provider(api_base: &str) -> GeminiTextProvider {
    GeminiTextProvider::new(GeminiConfig {
        api_key: Some("test-api-key".to_string()),
        model: "gemini-flash-latest".to_string(),
        api_base: api_base.to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("Failed to create provider")
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5}
    })
}

#[tokio::test]
async fn generate_posts_prompt_and_returns_text() {
    let (base, captured) = spawn_stub(StatusCode::OK, candidate("Recovery is structural.")).await;

    let text = provider(&base).generate("Reflect on this profile").await.unwrap();
    assert_eq!(text, "Recovery is structural.");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].action, "gemini-flash-latest:generateContent");
    assert_eq!(captured[0].key.as_deref(), Some("test-api-key"));
    assert_eq!(
        captured[0].body["contents"][0]["parts"][0]["text"],
        "Reflect on this profile"
    );
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let (base, _) = spawn_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"code": 429, "message": "Quota exceeded"}}),
    )
    .await;

    let result = provider(&base).generate("hi").await;
    assert!(matches!(result, Err(ProviderError::RateLimited)));
}

#[tokio::test]
async fn server_error_is_api_error() {
    let (base, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500, "message": "internal"}}),
    )
    .await;

    let result = provider(&base).generate("hi").await;
    assert!(matches!(result, Err(ProviderError::ApiError(_))));
}

#[tokio::test]
async fn unreachable_api_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = provider(&format!("http://127.0.0.1:{}", port))
        .generate("hi")
        .await;
    assert!(matches!(result, Err(ProviderError::NetworkError(_))));
}

#[tokio::test]
async fn health_check_lists_models_with_the_key() {
    let (base, captured) = spawn_stub(
        StatusCode::OK,
        json!({"models": [{"name": "models/gemini-flash-latest"}]}),
    )
    .await;

    provider(&base).health_check().await.unwrap();

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].action, "list");
    assert_eq!(captured[0].key.as_deref(), Some("test-api-key"));
}

#[tokio::test]
async fn health_check_rejected_key_is_api_error() {
    let (base, _) = spawn_stub(
        StatusCode::FORBIDDEN,
        json!({"error": {"code": 403, "message": "API key not valid"}}),
    )
    .await;

    let result = provider(&base).health_check().await;
    assert!(matches!(result, Err(ProviderError::ApiError(_))));
}

#[tokio::test]
async fn health_check_without_key_is_not_configured() {
    let provider = GeminiTextProvider::new(GeminiConfig {
        api_key: None,
        model: "gemini-flash-latest".to_string(),
        api_base: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("Failed to create provider");

    let result = provider.health_check().await;
    assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
}

async fn spawn_app_against(api_base: &str) -> u16 {
    let mut config = OnboardingConfig::default();
    config.common.port = 0;
    config.gemini.api_key = Some("test-api-key".to_string());
    config.gemini.api_base = api_base.to_string();
    config.gemini.timeout_secs = 5;

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until(std::future::pending()).await;
    });

    port
}

async fn post_muscle_gain(port: u16) -> Value {
    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/onboarding/ai-feedback", port))
        .json(&json!({
            "step_id": "s1",
            "prompt_key": "muscle_gain_feedback",
            "input_data": {
                "age_group": "30s",
                "current_body_type": "lean",
                "target_body_type": "muscular",
                "motivation": "health"
            }
        }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
async fn end_to_end_feedback_uses_gemini_reply() {
    let (base, captured) =
        spawn_stub(StatusCode::OK, candidate("Your 30s demand precise recovery.")).await;
    let port = spawn_app_against(&base).await;

    let body = post_muscle_gain(port).await;
    assert_eq!(body, json!({"text": "Your 30s demand precise recovery."}));

    let captured = captured.lock().unwrap();
    let prompt = captured[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("Connect 30s physiology and lean to the need for precision."));
}

#[tokio::test]
async fn end_to_end_feedback_absorbs_gemini_failure() {
    let (base, _) = spawn_stub(
        StatusCode::FORBIDDEN,
        json!({"error": {"code": 403, "message": "API key not valid"}}),
    )
    .await;
    let port = spawn_app_against(&base).await;

    let body = post_muscle_gain(port).await;
    assert_eq!(body["text"], SERVICE_UNREACHABLE_MESSAGE);
}
