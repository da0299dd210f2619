use crate::{
    Error,
    analysis::{AnalysisOutcome, RequestContext},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

impl AnalysisResponse {
    pub fn new(outcome: AnalysisOutcome, ctx: &RequestContext) -> Self {
        let (text, data) = match outcome {
            AnalysisOutcome::Text(text) => (Some(text), None),
            AnalysisOutcome::Raw(data) => (None, Some(data)),
        };

        Self {
            success: true,
            request_id: ctx.request_id.clone(),
            text,
            data,
        }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, ctx: &RequestContext) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
            request_id: Some(ctx.request_id.clone()),
        }
    }

    pub fn from_error(err: &Error, ctx: &RequestContext) -> Self {
        Self {
            details: err.details().cloned(),
            ..Self::new(err.public_message(), ctx)
        }
    }

    /// Body used after a panic, when the handler never produced a response.
    pub fn internal(ctx: Option<&RequestContext>) -> Self {
        Self {
            success: false,
            error: "Internal server error".to_string(),
            details: None,
            request_id: ctx.map(|ctx| ctx.request_id.clone()),
        }
    }
}
