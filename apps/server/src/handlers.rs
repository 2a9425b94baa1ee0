//! Request handlers.

use std::time::Instant;

use axum::{
    Json,
    body::Body,
    extract::{Request, State, rejection::JsonRejection},
    http::{
        StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use recap_core::{RecapError, SummaryType, build_prompt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub const BANNER: &str = "recap summarizer API is running!";
pub const STORE_ACCEPTED: &str = "Data accepted (no-op)";
const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub summary_type: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub status: &'static str,
}

fn reject(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::bad_request(rejection.body_text())
    }
}

pub async fn home() -> &'static str {
    BANNER
}

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> ApiResult<Json<SummarizeResponse>> {
    let Json(request) = payload.map_err(reject)?;

    let transcript = request
        .transcript
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("No transcript provided"))?;

    let summary_type: SummaryType = match request.summary_type.as_deref() {
        None => SummaryType::Insights,
        Some(raw) => raw.parse()?,
    };

    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| RecapError::UpstreamConfigMissing {
            env_var: GOOGLE_API_KEY.to_string(),
        })?;

    let summary = generator
        .generate(&build_prompt(summary_type, &transcript))
        .await?;

    info!(
        %summary_type,
        video_id = request.video_id.as_deref().unwrap_or("-"),
        "summary generated successfully"
    );
    Ok(Json(SummarizeResponse { summary }))
}

pub async fn store_video_data(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Json<StoreResponse>> {
    let Json(body) = payload.map_err(reject)?;
    let video_id = body.get("video_id").and_then(Value::as_str).unwrap_or("-");
    debug!(video_id, "video data received");
    Ok(Json(StoreResponse {
        status: STORE_ACCEPTED,
    }))
}

/// CORS preflight.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
        ],
    )
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );
    response
}
