mod prompt;
mod proxy;
mod types;

pub use prompt::{DESCRIBE_INSTRUCTION, LIST_INSTRUCTION, build_prompt};
pub use proxy::{Analysis, AnalysisOutcome, FALLBACK_TEXT, ImageAnalysisProxy};
pub use types::{AnalysisMode, AnalysisRequest, RequestContext};
