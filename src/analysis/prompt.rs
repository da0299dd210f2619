use super::types::AnalysisMode;

pub const LIST_INSTRUCTION: &str = "ONLY list visible objects in bullet points. No extra text.";
pub const DESCRIBE_INSTRUCTION: &str = "Describe the image clearly and concisely.";

impl AnalysisMode {
    pub fn instruction(self) -> &'static str {
        match self {
            Self::List => LIST_INSTRUCTION,
            Self::Describe => DESCRIBE_INSTRUCTION,
        }
    }
}

/// Prompt text sent alongside the image. Depends only on `mode` and `query`.
pub fn build_prompt(mode: AnalysisMode, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{}\n\nUser request: {}", mode.instruction(), query),
        None => mode.instruction().to_string(),
    }
}
