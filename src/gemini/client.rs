use super::types::*;
use crate::{
    Error, Result,
    config::{CredentialPlacement, GeminiConfig},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Performs exactly one upstream call. Non-success statuses, transport
    /// failures and timeouts are returned as [`Error::Upstream`].
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<UpstreamReply>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    credential: CredentialPlacement,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            credential: config.credential,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VisionClient for GeminiClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<UpstreamReply> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::config("GEMINI_API_KEY is not configured"))?;

        let builder = self.client.post(&self.endpoint).json(request);
        let builder = match self.credential {
            CredentialPlacement::Header => builder.header(API_KEY_HEADER, api_key),
            CredentialPlacement::Query => builder.query(&[("key", api_key)]),
        };

        debug!(
            endpoint = %self.endpoint,
            credential = ?self.credential,
            "Sending generateContent request"
        );

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        let body = serde_json::from_str::<Value>(&text).ok();

        debug!(status = status.as_u16(), bytes = text.len(), "Received generateContent response");

        if !status.is_success() {
            let message = failure_message(status, body.as_ref());
            let details = body.or_else(|| (!text.trim().is_empty()).then(|| Value::String(text)));
            return Err(Error::upstream(Some(status.as_u16()), message, details));
        }

        Ok(UpstreamReply {
            status: status.as_u16(),
            body: body.unwrap_or(Value::Null),
        })
    }
}

fn failure_message(status: StatusCode, body: Option<&Value>) -> String {
    match body.and_then(error_message) {
        Some(message) => format!("Gemini API error {}: {}", status.as_u16(), message),
        None => format!("Gemini API error {}", status.as_u16()),
    }
}

// The request URL may carry the API key, so it is stripped from the error.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::upstream(None, "Gemini request timed out", None)
    } else {
        Error::upstream(
            None,
            format!("Failed to reach Gemini: {}", err.without_url()),
            None,
        )
    }
}
