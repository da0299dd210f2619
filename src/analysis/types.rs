use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Body of an analyze call. Fields holding anything other than a string
/// are read as absent rather than failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub mode: Option<String>,
    /// Base64 image, forwarded to the upstream as-is.
    #[serde(default, deserialize_with = "string_or_none")]
    pub image: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisMode {
    List,
    #[default]
    Describe,
}

/// Per-request correlation data. Lives only as long as the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}

impl AnalysisRequest {
    pub fn mode(&self) -> AnalysisMode {
        AnalysisMode::from_option(self.mode.as_deref())
    }

    /// The query exactly as sent, when it carries anything besides whitespace.
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .filter(|query| !query.trim().is_empty())
    }

    /// The image payload, when it carries anything besides whitespace.
    pub fn image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
    }
}

impl AnalysisMode {
    /// Only the exact value `list` selects enumeration.
    pub fn from_option(mode: Option<&str>) -> Self {
        match mode {
            Some("list") => Self::List,
            _ => Self::Describe,
        }
    }
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}
