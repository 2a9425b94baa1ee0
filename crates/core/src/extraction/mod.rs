//! Readers for the parts of a watch page we care about.
//!
//! Every selector list is ordered by preference; the page markup drifts and
//! older layouts are still served to some clients.

pub mod chapters;
pub mod description;
pub mod metadata;
pub mod transcript;

pub use chapters::extract_chapters;
pub use description::{NO_DESCRIPTION, extract_description};
pub use metadata::{extract_metadata, parse_like_count, video_id_from_location};
pub use transcript::{ExtractionConfig, SEGMENT_SELECTOR, TranscriptExtractor};
