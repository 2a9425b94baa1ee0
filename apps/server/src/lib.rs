//! HTTP side of recap.
//!
//! - `POST /api/summarize`: prompt a text model with one of the summary presets
//! - `POST /api/store-video-data`: accept extracted page data (not persisted)

pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use gemini::{GeminiClient, TextGenerator};
pub use routes::create_router;
pub use state::AppState;
