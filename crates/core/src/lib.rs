//! Core of recap: reads a watch page through [`Page`], groups its transcript
//! into time buckets, and asks a summary backend for one of three summary
//! presets. Per-video state lives in a [`Session`]; the [`Orchestrator`]
//! swaps sessions on navigation and drives the panel model in [`ui`].

pub mod client;
pub mod config;
pub mod error;
pub mod extraction;
pub mod grouping;
pub mod navigation;
pub mod orchestrator;
pub mod page;
pub mod poll;
pub mod prompt;
pub mod session;
pub mod timestamp;
pub mod types;
pub mod ui;

pub use client::{BackendClient, SummaryBackend};
pub use config::RecapConfig;
pub use error::{RecapError, Result};
pub use extraction::{ExtractionConfig, TranscriptExtractor};
pub use grouping::{RawSegment, bucket_width, group_segments};
pub use navigation::{NavigationMessage, extract_video_id};
pub use orchestrator::Orchestrator;
pub use page::{Element, ElementHandle, Page, VideoInfo};
pub use poll::Poll;
pub use prompt::build_prompt;
pub use session::{Phase, Session};
pub use timestamp::{format_duration, seconds_to_timestamp, timestamp_to_seconds};
pub use types::{
    Chapter, SummaryType, TranscriptData, TranscriptEntry, VideoDataPayload, VideoMetadata,
};
