use college_finder::core::ModelClient;
use college_finder::{FinderConfig, FinderError, GeminiClient};
use httpmock::prelude::*;

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn config_for(server: &MockServer) -> FinderConfig {
    FinderConfig {
        api_key: Some("test-key".to_string()),
        api_endpoint: server.base_url(),
        model: "gemini-test".to_string(),
        ..FinderConfig::default()
    }
}

#[tokio::test]
async fn test_generate_sends_key_header_and_prompt() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "test-key")
            .json_body(serde_json::json!({
                "contents": [{"parts": [{"text": "List colleges in Goa"}]}]
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "[{\"name\": "}, {"text": "\"Goa College\"}]"}]
                    },
                    "finishReason": "STOP"
                }]
            }));
    });

    let client = GeminiClient::from_config(&config_for(&server)).unwrap();
    let text = client.generate("List colleges in Goa").await.unwrap();

    api_mock.assert();
    assert_eq!(text, "[{\"name\": \"Goa College\"}]");
}

#[tokio::test]
async fn test_temperature_is_sent_as_generation_config() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .json_body_partial(r#"{"generationConfig": {"temperature": 0.5}}"#);
        then.status(200).json_body(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "[]"}]}}]
        }));
    });

    let config = FinderConfig {
        temperature: Some(0.5),
        ..config_for(&server)
    };
    let client = GeminiClient::from_config(&config).unwrap();
    client.generate("prompt").await.unwrap();

    api_mock.assert();
}

#[tokio::test]
async fn test_error_status_carries_api_message() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(429).json_body(serde_json::json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        }));
    });

    let client = GeminiClient::from_config(&config_for(&server)).unwrap();
    let error = client.generate("prompt").await.unwrap_err();

    match &error {
        FinderError::ApiStatusError { status, message } => {
            assert_eq!(*status, 429);
            assert!(message.contains("exhausted"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(error.is_retryable());
    assert!(error.recovery_suggestion().contains("quota"));
}

#[tokio::test]
async fn test_blocked_response_without_text_is_empty_output() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }));
    });

    let client = GeminiClient::from_config(&config_for(&server)).unwrap();
    let error = client.generate("prompt").await.unwrap_err();
    assert!(matches!(error, FinderError::EmptyModelOutputError));
}

#[tokio::test]
async fn test_missing_key_fails_before_any_request() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200);
    });

    let config = FinderConfig {
        api_key: None,
        ..config_for(&server)
    };
    let client = GeminiClient::from_config(&config).unwrap();
    let error = client.generate("prompt").await.unwrap_err();

    assert!(matches!(error, FinderError::MissingApiKeyError));
    api_mock.assert_hits(0);
}
