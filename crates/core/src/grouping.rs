use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::{RecapError, Result},
    timestamp::{seconds_to_timestamp, timestamp_to_seconds},
    types::{TranscriptData, TranscriptEntry},
};

/// Duration assumed when the video element does not report one.
pub const DEFAULT_DURATION_SECS: f64 = 600.0;

/// One caption unit as read from the transcript panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub timestamp: String,
    pub text: String,
}

impl RawSegment {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }
}

/// Bucket width in seconds for a video of the given duration.
pub fn bucket_width(duration_secs: f64) -> u64 {
    if duration_secs >= 1200.0 {
        60
    } else if duration_secs >= 480.0 {
        30
    } else {
        15
    }
}

/// Normalize a reported duration, falling back to [`DEFAULT_DURATION_SECS`].
pub fn effective_duration(reported: Option<f64>) -> f64 {
    match reported {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Merge caption segments into fixed-width time buckets.
///
/// Segments with empty text or an unparseable timestamp are skipped. Fails
/// with `NoTranscriptAvailable` when nothing survives.
pub fn group_segments(segments: &[RawSegment], bucket: u64) -> Result<TranscriptData> {
    let bucket = bucket.max(1);
    let mut groups: BTreeMap<u64, Vec<&str>> = BTreeMap::new();

    for seg in segments {
        let text = seg.text.trim();
        if text.is_empty() {
            continue;
        }
        let seconds = match timestamp_to_seconds(&seg.timestamp) {
            Ok(s) => s,
            Err(e) => {
                debug!(timestamp = %seg.timestamp, error = %e, "skipping segment");
                continue;
            }
        };
        groups.entry(seconds / bucket * bucket).or_default().push(text);
    }

    if groups.is_empty() {
        return Err(RecapError::no_transcript(format!(
            "Found {} segments but couldn't extract text.",
            segments.len()
        )));
    }

    let entries = groups
        .into_iter()
        .map(|(start, texts)| TranscriptEntry::new(seconds_to_timestamp(start), texts.join(" ")))
        .collect();

    Ok(TranscriptData::new(entries))
}
