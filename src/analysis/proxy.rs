use super::{prompt::build_prompt, types::AnalysisRequest};
use crate::{
    Error, Result,
    config::{AnalysisConfig, Config, GeminiConfig, ResponseFormat},
    gemini::{GeminiClient, GenerateContentRequest, VisionClient},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Returned as a successful answer when the upstream reply has no candidate text.
pub const FALLBACK_TEXT: &str = "No response from Gemini";

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Text(String),
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub upstream_status: u16,
    pub outcome: AnalysisOutcome,
}

/// Validates an analysis request, forwards it upstream once and maps the reply.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct ImageAnalysisProxy {
    client: Arc<dyn VisionClient>,
    api_key_configured: bool,
    mime_type: String,
    response_format: ResponseFormat,
}

impl ImageAnalysisProxy {
    pub fn new(
        client: Arc<dyn VisionClient>,
        gemini: &GeminiConfig,
        analysis: &AnalysisConfig,
    ) -> Self {
        Self {
            client,
            api_key_configured: gemini.has_api_key(),
            mime_type: gemini.mime_type.clone(),
            response_format: analysis.response_format,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        Ok(Self::new(
            Arc::new(client),
            &config.gemini,
            &config.analysis,
        ))
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    /// Builds the upstream body, checking input and configuration first.
    pub fn prepare(&self, request: &AnalysisRequest) -> Result<GenerateContentRequest> {
        let image = request
            .image()
            .ok_or_else(|| Error::validation("Image is required"))?;

        if !self.api_key_configured {
            return Err(Error::config("GEMINI_API_KEY is not configured"));
        }

        let prompt = build_prompt(request.mode(), request.query());
        Ok(GenerateContentRequest::user_image(
            prompt,
            self.mime_type.as_str(),
            image,
        ))
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis> {
        let upstream_request = self.prepare(request)?;

        debug!(
            mode = ?request.mode(),
            has_query = request.query().is_some(),
            image_len = request.image().map_or(0, str::len),
            "Forwarding image for analysis"
        );

        let reply = self.client.generate_content(&upstream_request).await?;

        let upstream_status = reply.status;
        let outcome = match self.response_format {
            ResponseFormat::Raw => AnalysisOutcome::Raw(reply.body),
            ResponseFormat::Text => match reply.first_text() {
                Some(text) => AnalysisOutcome::Text(text.to_string()),
                None => {
                    debug!("Upstream reply had no candidate text, using fallback");
                    AnalysisOutcome::Text(FALLBACK_TEXT.to_string())
                }
            },
        };

        Ok(Analysis {
            upstream_status,
            outcome,
        })
    }
}
