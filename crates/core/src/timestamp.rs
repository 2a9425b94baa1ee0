//! Timestamp labels as rendered by the transcript panel.
//!
//! Labels are `m:ss` or `h:mm:ss`. Bucket labels are always emitted as
//! `m:ss` with unbounded minutes, so `75:00` is a valid label.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("invalid {0} component: {1}")]
    InvalidValue(&'static str, String),
    #[error("invalid timestamp format '{0}', expected m:ss or h:mm:ss")]
    InvalidFormat(String),
}

fn component(name: &'static str, raw: &str) -> Result<u64, TimestampError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| TimestampError::InvalidValue(name, raw.to_string()))
}

/// Parse an `m:ss` or `h:mm:ss` label into whole seconds.
pub fn timestamp_to_seconds(label: &str) -> Result<u64, TimestampError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = label.split(':').collect();
    let total = match parts.as_slice() {
        [mins, secs] => {
            let mins = component("minutes", mins)?;
            let secs = component("seconds", secs)?;
            mins.checked_mul(60).and_then(|m| m.checked_add(secs))
        }
        [hours, mins, secs] => {
            let hours = component("hours", hours)?;
            let mins = component("minutes", mins)?;
            let secs = component("seconds", secs)?;
            hours
                .checked_mul(3600)
                .and_then(|h| h.checked_add(mins.checked_mul(60)?))
                .and_then(|t| t.checked_add(secs))
        }
        _ => return Err(TimestampError::InvalidFormat(label.to_string())),
    };
    total.ok_or_else(|| TimestampError::InvalidValue("timestamp", label.to_string()))
}

/// Format whole seconds as an `m:ss` bucket label.
pub fn seconds_to_timestamp(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a video duration as `h:mm:ss`, or `m:ss` under an hour.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}
