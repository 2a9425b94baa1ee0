//! Server configuration.

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Key for the generative-language API; summaries fail without it
    pub google_api_key: Option<String>,
    /// Model used for every summary type
    pub model: String,
    /// Base URL of the generative-language API
    pub gemini_base_url: String,
    /// Max request body size
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            google_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_body_size: 5 * 1024 * 1024, // 5MB
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("RECAP_HOST").unwrap_or(defaults.host),
            port: lookup("RECAP_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            google_api_key: lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty()),
            model: lookup("RECAP_MODEL").unwrap_or(defaults.model),
            gemini_base_url: lookup("RECAP_GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            max_body_size: lookup("RECAP_MAX_BODY_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
