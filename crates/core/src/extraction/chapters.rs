use std::collections::HashMap;

use tracing::{debug, info};

use crate::{page::Page, timestamp::timestamp_to_seconds, types::Chapter};

const CHAPTER_SELECTORS: &[&str] = &[
    "ytd-macro-markers-list-item-renderer",
    "#structured-description ytd-horizontal-card-list-renderer ytd-macro-markers-list-item-renderer",
];

/// Chapter markers, sorted by start time. Empty when the video has none.
pub async fn extract_chapters<P: Page + ?Sized>(page: &P) -> Vec<Chapter> {
    let mut chapters: HashMap<String, String> = HashMap::new();

    for selector in CHAPTER_SELECTORS {
        for item in page.query_all(selector).await {
            let time = page.query_within(item.handle, "#time").await;
            let title = page.query_within(item.handle, "#details h4").await;
            if let (Some(time), Some(title)) = (time, title) {
                chapters.insert(time.text.trim().to_string(), title.text.trim().to_string());
            }
        }
        if !chapters.is_empty() {
            break;
        }
    }

    if chapters.is_empty() {
        debug!("no chapters found");
        return Vec::new();
    }

    let mut sorted: Vec<Chapter> = chapters
        .into_iter()
        .map(|(timestamp, title)| Chapter { timestamp, title })
        .collect();
    sorted.sort_by_key(|c| timestamp_to_seconds(&c.timestamp).unwrap_or(u64::MAX));

    info!(count = sorted.len(), "found chapters");
    sorted
}
