use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::error::RecapError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub video_id: String,
    pub channel: ChannelInfo,
    pub content: ContentInfo,
    pub engagement: Engagement,
    pub context: MetadataContext,
    pub extraction_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
    pub url: String,
    pub subscriber_count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub duration_seconds: u64,
    pub duration_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub view_count: String,
    pub upload_date: String,
    pub like_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataContext {
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.instagram.is_none()
            && self.tiktok.is_none()
            && self.twitter.is_none()
            && self.facebook.is_none()
            && self.website.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub timestamp: String,
    pub title: String,
}

/// One bucket of the grouped transcript: a label and the captions inside it.
///
/// Serialized as a single-key object, `{"0:15": "caption text"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub timestamp: String,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp, self.text)
    }
}

impl Serialize for TranscriptEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.timestamp, &self.text)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for TranscriptEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = TranscriptEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one timestamp key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some((timestamp, text)) = map.next_entry::<String, String>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(TranscriptEntry { timestamp, text })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

static TRANSCRIPT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?(\d+:\d{2}(?::\d{2})?)\]?\s+(.+)$").expect("transcript line regex")
});

/// Grouped transcript: ordered entries plus the flattened `[label] text` form.
///
/// The text is always derived from the entries, so the two cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptData {
    entries: Vec<TranscriptEntry>,
    text: String,
}

impl TranscriptData {
    pub fn new(entries: Vec<TranscriptEntry>) -> Self {
        let text = entries
            .iter()
            .map(TranscriptEntry::line)
            .collect::<Vec<_>>()
            .join("\n");
        Self { entries, text }
    }

    /// Rebuild transcript data from its flattened text form.
    ///
    /// Lines that do not start with a `m:ss`/`h:mm:ss` label (bracketed or
    /// not) are dropped.
    pub fn parse_text(raw: &str) -> Self {
        let entries = raw
            .lines()
            .filter_map(|line| {
                let caps = TRANSCRIPT_LINE.captures(line.trim())?;
                Some(TranscriptEntry::new(&caps[1], caps[2].trim()))
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for TranscriptData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            entries: Vec<TranscriptEntry>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(TranscriptData::new(raw.entries))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    Insights,
    #[default]
    Concise,
    Detailed,
}

impl SummaryType {
    pub const ALL: [SummaryType; 3] = [
        SummaryType::Insights,
        SummaryType::Concise,
        SummaryType::Detailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Insights => "insights",
            SummaryType::Concise => "concise",
            SummaryType::Detailed => "detailed",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryType {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insights" => Ok(SummaryType::Insights),
            "concise" => Ok(SummaryType::Concise),
            "detailed" => Ok(SummaryType::Detailed),
            _ => Err(RecapError::InvalidRequest("Invalid summary_type".to_string())),
        }
    }
}

/// Body of the store request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDataPayload {
    pub video_id: String,
    pub video_title: String,
    pub metadata: Option<VideoMetadata>,
    pub description: String,
    pub chapters: Vec<Chapter>,
    pub transcript_structured: Vec<TranscriptEntry>,
    pub extraction_timestamp: DateTime<Utc>,
}

impl VideoDataPayload {
    pub fn new(
        video_id: &str,
        metadata: Option<VideoMetadata>,
        description: String,
        chapters: Vec<Chapter>,
        transcript: &TranscriptData,
    ) -> Self {
        let video_title = metadata
            .as_ref()
            .map(|m| m.title.clone())
            .unwrap_or_else(|| video_id.to_string());
        Self {
            video_id: video_id.to_string(),
            video_title,
            metadata,
            description,
            chapters,
            transcript_structured: transcript.entries().to_vec(),
            extraction_timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_as_single_key_object() {
        let entry = TranscriptEntry::new("0:15", "hello world");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"0:15":"hello world"}"#);

        let back: TranscriptEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn entry_rejects_multi_key_objects() {
        let err = serde_json::from_str::<TranscriptEntry>(r#"{"0:00":"a","0:15":"b"}"#);
        assert!(err.is_err());
        assert!(serde_json::from_str::<TranscriptEntry>("{}").is_err());
    }

    #[test]
    fn text_is_derived_from_entries() {
        let data = TranscriptData::new(vec![
            TranscriptEntry::new("0:00", "hello"),
            TranscriptEntry::new("0:15", "world"),
        ]);
        assert_eq!(data.text(), "[0:00] hello\n[0:15] world");
    }

    #[test]
    fn parse_text_accepts_bracketed_and_bare_labels() {
        let data = TranscriptData::parse_text("[0:00] hello\n\n0:15 world\nnot a line\n[1:02:03] late");
        let labels: Vec<_> = data.entries().iter().map(|e| e.timestamp.as_str()).collect();
        assert_eq!(labels, vec!["0:00", "0:15", "1:02:03"]);
        assert_eq!(data.text(), "[0:00] hello\n[0:15] world\n[1:02:03] late");
    }

    #[test]
    fn parse_text_reads_labels_past_99_minutes() {
        let late = crate::timestamp::seconds_to_timestamp(6000);
        assert_eq!(late, "100:00");

        let data = TranscriptData::parse_text(&format!("[0:00] a\n[{late}] late"));
        assert_eq!(
            data.entries(),
            &[TranscriptEntry::new("0:00", "a"), TranscriptEntry::new("100:00", "late")]
        );
    }

    #[test]
    fn deserialized_transcript_recomputes_text() {
        let json = r#"{"entries":[{"0:00":"a"},{"0:30":"b"}],"text":"stale"}"#;
        let data: TranscriptData = serde_json::from_str(json).unwrap();
        assert_eq!(data.text(), "[0:00] a\n[0:30] b");
    }

    #[test]
    fn summary_type_parses_known_values_only() {
        assert_eq!("concise".parse::<SummaryType>().unwrap(), SummaryType::Concise);
        assert_eq!("insights".parse::<SummaryType>().unwrap(), SummaryType::Insights);
        assert!(matches!(
            "bogus".parse::<SummaryType>(),
            Err(RecapError::InvalidRequest(_))
        ));
        assert_eq!(serde_json::to_string(&SummaryType::Detailed).unwrap(), "\"detailed\"");
    }

    #[test]
    fn payload_title_falls_back_to_video_id() {
        let transcript = TranscriptData::new(vec![TranscriptEntry::new("0:00", "hi")]);
        let payload = VideoDataPayload::new("abc123", None, String::new(), vec![], &transcript);
        assert_eq!(payload.video_title, "abc123");
        assert_eq!(payload.transcript_structured.len(), 1);
    }
}
