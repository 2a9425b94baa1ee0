use thiserror::Error;

use crate::timestamp::TimestampError;

#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Video element not found")]
    VideoElementMissing,

    #[error("{reason}")]
    NoTranscriptAvailable { reason: String },

    #[error("Network failure: {reason}")]
    NetworkFailure {
        reason: String,
        status: Option<u16>,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing {env_var}")]
    UpstreamConfigMissing { env_var: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] TimestampError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecapError {
    pub fn no_transcript(reason: impl Into<String>) -> Self {
        Self::NoTranscriptAvailable {
            reason: reason.into(),
        }
    }

    /// Whether the panel should offer a retry button for this failure.
    pub fn offers_retry(&self) -> bool {
        matches!(
            self,
            RecapError::VideoElementMissing | RecapError::NoTranscriptAvailable { .. }
        )
    }
}

impl From<reqwest::Error> for RecapError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        RecapError::NetworkFailure {
            reason,
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
