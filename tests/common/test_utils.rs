use super::MockVisionClient;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use vision_proxy::{
    Result,
    analysis::ImageAnalysisProxy,
    config::{Config, GeminiConfig},
    server::{self, AppState},
};
use wiremock::MockServer;

/// 1x1 JPEG, base64.
pub const SAMPLE_IMAGE: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHRofHh0aHBwgJC4nICIsIxwcKDcpLDAxNDQ0Hyc5PTgyPC4zNDL/wAALCAABAAEBAREA/8QAFAABAAAAAAAAAAAAAAAAAAAACf/EABQQAQAAAAAAAAAAAAAAAAAAAAD/2gAIAQEAAD8AKp//2Q==";

pub const TEST_API_KEY: &str = "test-api-key";

/// Path the default model is served on, relative to the mock server root.
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// Create a test configuration pointing at `upstream_uri`
pub fn create_test_config(upstream_uri: &str) -> Config {
    Config {
        gemini: GeminiConfig {
            base_url: format!("{}/v1beta", upstream_uri),
            api_key: Some(TEST_API_KEY.to_string()),
            timeout_ms: 2_000,
            ..GeminiConfig::default()
        },
        ..Config::default()
    }
}

/// Standard Gemini success body with one candidate
pub fn gemini_success_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 270, "candidatesTokenCount": 12}
    })
}

pub async fn start_gemini_mock() -> MockServer {
    MockServer::start().await
}

/// Full application backed by the real reqwest client
pub fn test_server(config: &Config) -> TestServer {
    let proxy = ImageAnalysisProxy::from_config(config).unwrap();
    let state = AppState {
        proxy: Arc::new(proxy),
    };
    TestServer::new(server::router(state, &config.server)).unwrap()
}

/// Full application backed by a mock client
pub fn test_server_with_client(client: Arc<MockVisionClient>, config: &Config) -> TestServer {
    let proxy = ImageAnalysisProxy::new(client, &config.gemini, &config.analysis);
    let state = AppState {
        proxy: Arc::new(proxy),
    };
    TestServer::new(server::router(state, &config.server)).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  body_limit_bytes: 1048576
  logs:
    level: "debug"

gemini:
  base_url: "http://localhost:9999/v1beta"
  model: "gemini-1.5-flash"
  api_key: "yaml-key"
  credential: "query"
  timeout_ms: 5000

analysis:
  response_format: "raw"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

gemini:
  credential: "cookie"
"#;
