use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The upstream call failed, timed out or answered with a non-success status.
    /// `status` is the upstream HTTP status when one was received.
    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        details: Option<Value>,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>, details: Option<Value>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
            details,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status this error maps to at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Upstream {
                status: Some(status),
                ..
            } if (400..600).contains(status) => *status,
            _ => 500,
        }
    }

    /// Message safe to return to callers. Internal failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Validation(msg) => msg.clone(),
            Self::Upstream { message, .. } => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Upstream { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
