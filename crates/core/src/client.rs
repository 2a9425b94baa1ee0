use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    error::{RecapError, Result},
    types::{SummaryType, VideoDataPayload},
};

pub const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(60);
pub const STORE_TIMEOUT: Duration = Duration::from_secs(15);

/// Remote side of the summarize/store workflow.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn summarize(&self, transcript_text: &str, summary_type: SummaryType) -> Result<String>;

    /// Best-effort persistence; implementations log failures and return.
    async fn store_video_data(&self, payload: &VideoDataPayload);
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    summarize_timeout: Duration,
    store_timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // endpoints are joined relative to the base, so keep its last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            summarize_timeout: SUMMARIZE_TIMEOUT,
            store_timeout: STORE_TIMEOUT,
        })
    }

    pub fn with_timeouts(mut self, summarize: Duration, store: Duration) -> Self {
        self.summarize_timeout = summarize;
        self.store_timeout = store;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl SummaryBackend for BackendClient {
    async fn summarize(&self, transcript_text: &str, summary_type: SummaryType) -> Result<String> {
        let url = self.endpoint("api/summarize")?;
        debug!(%url, %summary_type, chars = transcript_text.len(), "requesting summary");

        let response = self
            .http
            .post(url)
            .timeout(self.summarize_timeout)
            .json(&serde_json::json!({
                "transcript": transcript_text,
                "summary_type": summary_type,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    format!("Summary request failed with status {}", status.as_u16())
                });
            return Err(RecapError::NetworkFailure {
                reason: message,
                status: Some(status.as_u16()),
            });
        }

        let body: SummaryResponse = response.json().await?;
        info!(%summary_type, "summary received");
        Ok(body.summary)
    }

    async fn store_video_data(&self, payload: &VideoDataPayload) {
        let url = match self.endpoint("api/store-video-data") {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "could not send to backend");
                return;
            }
        };

        let sent = self
            .http
            .post(url)
            .timeout(self.store_timeout)
            .json(payload)
            .send()
            .await;

        match sent {
            Ok(resp) if resp.status().is_success() => {
                info!(video_id = %payload.video_id, "data sent to backend");
            }
            Ok(resp) => warn!(status = resp.status().as_u16(), "backend storage failed"),
            Err(e) => warn!(error = %e, "could not send to backend"),
        }
    }
}
