use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A successful upstream answer. `body` is `Null` when the upstream sent
/// something that was not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl GenerateContentRequest {
    /// Single user turn carrying a text prompt followed by one inline image.
    pub fn user_image(
        prompt: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: prompt.into(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.into(),
                            data: data.into(),
                        },
                    },
                ],
            }],
        }
    }

    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .iter()
            .flat_map(|content| &content.parts)
            .find_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
    }
}

impl UpstreamReply {
    pub fn first_text(&self) -> Option<&str> {
        first_candidate_text(&self.body)
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-empty.
pub fn first_candidate_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// `error.message` from a Gemini error body.
pub fn error_message(body: &Value) -> Option<&str> {
    body.pointer("/error/message").and_then(Value::as_str)
}
