use pretty_assertions::assert_eq;
use vision_proxy::config::{self, CredentialPlacement, ResponseFormat};

mod common;
use common::*;

#[tokio::test]
async fn test_load_config_from_file() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML)
        .await
        .unwrap();

    let config = config::from_file(&path).await.unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.body_limit_bytes, 1_048_576);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(config.gemini.api_key.as_deref(), Some("yaml-key"));
    assert_eq!(config.gemini.credential, CredentialPlacement::Query);
    assert_eq!(config.gemini.timeout_ms, 5000);
    assert_eq!(config.gemini.mime_type, "image/jpeg");
    assert_eq!(config.analysis.response_format, ResponseFormat::Raw);
    assert_eq!(
        config.gemini.endpoint(),
        "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
    );
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "gemini:\n  model: \"gemini-1.5-pro\"\n")
        .await
        .unwrap();

    let config = config::from_file(&path).await.unwrap();

    assert_eq!(config.gemini.model, "gemini-1.5-pro");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.gemini.timeout_ms, 15_000);
    assert_eq!(config.gemini.credential, CredentialPlacement::Header);
    assert!(config.gemini.api_key.is_none());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, INVALID_CONFIG_YAML)
        .await
        .unwrap();

    let result = config::from_file(&path).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("absent.yaml");

    let result = config::from_file(&path.to_string_lossy()).await;

    assert!(matches!(result, Err(vision_proxy::Error::Io(_))));
}

#[tokio::test]
async fn test_env_overrides_win_over_file() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML)
        .await
        .unwrap();
    let from_file = config::from_file(&path).await.unwrap();

    let config = config::apply_env_overrides(from_file, |key| match key {
        "GEMINI_API_KEY" => Some("env-key".to_string()),
        "PORT" => Some("9090".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.gemini.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
}
