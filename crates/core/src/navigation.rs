//! Messages from the extension's background side about tab navigation.

use serde::{Deserialize, Serialize};
use url::Url;

pub const URL_CHANGED: &str = "YOUTUBE_URL_CHANGED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavigationMessage {
    #[serde(rename = "YOUTUBE_URL_CHANGED")]
    UrlChanged {
        #[serde(rename = "videoId", default, skip_serializing_if = "Option::is_none")]
        video_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl NavigationMessage {
    pub fn url_changed(video_id: impl Into<String>) -> Self {
        NavigationMessage::UrlChanged {
            video_id: Some(video_id.into()),
            url: None,
        }
    }

    /// Video id carried by the message, falling back to parsing its URL.
    pub fn video_id(&self) -> Option<String> {
        match self {
            NavigationMessage::UrlChanged { video_id, url } => video_id
                .clone()
                .filter(|id| !id.is_empty())
                .or_else(|| url.as_deref().and_then(extract_video_id)),
        }
    }
}

/// Video id from a watch URL (`?v=`) or a `youtu.be/<id>` short link.
pub fn extract_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    if url.host_str() == Some("youtu.be") {
        let id = url.path().trim_start_matches('/');
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    None
}

/// Message to post to the content script for a tab update, if any.
pub fn tab_update_message(status: &str, url: Option<&str>) -> Option<NavigationMessage> {
    let url = url?;
    if status != "complete" || !url.contains("youtube.com/watch") {
        return None;
    }
    Some(NavigationMessage::UrlChanged {
        video_id: extract_video_id(url),
        url: None,
    })
}
