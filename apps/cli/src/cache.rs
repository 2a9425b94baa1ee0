use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use recap_core::{Result, SummaryType};
use tokio::fs;

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("recap")
}

/// Cache key for a transcript: the video id when known, else a hash of the text.
pub fn cache_key(video_id: Option<&str>, transcript: &str) -> String {
    match video_id.filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => {
            let mut hasher = DefaultHasher::new();
            transcript.hash(&mut hasher);
            format!("{:016x}", hasher.finish())
        }
    }
}

pub fn get_cache_dir(root: &Path, key: &str) -> PathBuf {
    root.join(key)
}

pub fn get_summary_path(cache_dir: &Path, summary_type: SummaryType) -> PathBuf {
    cache_dir.join(format!("summary_{}.md", summary_type))
}

pub async fn load_summary(cache_dir: &Path, summary_type: SummaryType) -> Option<String> {
    fs::read_to_string(get_summary_path(cache_dir, summary_type))
        .await
        .ok()
        .filter(|s| !s.is_empty())
}

pub async fn save_summary(cache_dir: &Path, summary_type: SummaryType, summary: &str) -> Result<()> {
    fs::create_dir_all(cache_dir).await?;
    fs::write(get_summary_path(cache_dir, summary_type), summary).await?;
    Ok(())
}
