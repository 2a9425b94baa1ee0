//! Client-side configuration.

use crate::{extraction::ExtractionConfig, types::SummaryType};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct RecapConfig {
    /// Base URL of the summarize/store service
    pub backend_url: String,
    /// Summary generated right after a transcript is extracted
    pub default_summary: SummaryType,
    /// Send extracted data to the store endpoint after extraction
    pub store_video_data: bool,
    pub extraction: ExtractionConfig,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            default_summary: SummaryType::Concise,
            store_video_data: false,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl RecapConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: lookup("RECAP_BACKEND_URL").unwrap_or(defaults.backend_url),
            default_summary: lookup("RECAP_DEFAULT_SUMMARY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_summary),
            store_video_data: lookup("RECAP_STORE_VIDEO_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.store_video_data),
            extraction: defaults.extraction,
        }
    }
}
