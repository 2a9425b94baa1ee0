//! Client for the generative-language `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> ApiResult<String>;
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: Url,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiResponse {
    /// Text of the first candidate, parts concatenated.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: &str) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::upstream(format!("Invalid Gemini base URL: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url,
            client: Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `generateContent` URL under the base path. The key travels in a
    /// header so it never appears in the URL or in transport errors.
    pub fn endpoint(&self) -> ApiResult<Url> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| ApiError::upstream(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, chars = prompt.len(), "calling generateContent");
        let response = self
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ApiError::upstream(format!("Gemini request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<GeminiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("Gemini API error: {status}"),
            };
            warn!(model = %self.model, %status, %message, "generation failed");
            return Err(ApiError::Upstream(message));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| {
                ApiError::upstream(format!("Failed to parse Gemini response: {}", e.without_url()))
            })?;

        info!(model = %self.model, "summary generated");
        Ok(body.into_text())
    }
}
