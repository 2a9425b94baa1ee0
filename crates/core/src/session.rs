//! Per-video caches.
//!
//! A [`Session`] belongs to exactly one video id. Navigation never clears a
//! session in place; the orchestrator drops it and starts a new one.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    client::SummaryBackend,
    error::Result,
    extraction::{ExtractionConfig, TranscriptExtractor, extract_metadata},
    page::Page,
    types::{SummaryType, TranscriptData, VideoMetadata},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ready,
    Failed(String),
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    video_id: String,
    metadata: OnceCell<VideoMetadata>,
    transcript: OnceCell<TranscriptData>,
    extraction: Mutex<Phase>,
    summaries: Mutex<HashMap<SummaryType, Arc<OnceCell<String>>>>,
    summary_phases: Mutex<HashMap<SummaryType, Phase>>,
}

impl Session {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            video_id: video_id.into(),
            metadata: OnceCell::new(),
            transcript: OnceCell::new(),
            extraction: Mutex::new(Phase::Idle),
            summaries: Mutex::new(HashMap::new()),
            summary_phases: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Page metadata, read once per session.
    pub async fn metadata<P: Page + ?Sized>(&self, page: &P) -> &VideoMetadata {
        self.metadata
            .get_or_init(|| async {
                debug!(session = %self.id, "metadata cache miss");
                extract_metadata(page).await
            })
            .await
    }

    pub fn cached_metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.get()
    }

    /// Grouped transcript, extracted at most once per session.
    ///
    /// Concurrent callers share the in-flight extraction. A failed attempt
    /// leaves the cache empty so a later call tries again.
    pub async fn transcript<P: Page + ?Sized>(
        &self,
        page: &P,
        config: &ExtractionConfig,
    ) -> Result<&TranscriptData> {
        if let Some(cached) = self.transcript.get() {
            debug!(session = %self.id, "using cached transcript");
            return Ok(cached);
        }

        self.transcript
            .get_or_try_init(|| async {
                *lock(&self.extraction) = Phase::Running;
                let result = TranscriptExtractor::new(page, config).extract().await;
                *lock(&self.extraction) = match &result {
                    Ok(_) => Phase::Ready,
                    Err(e) => {
                        warn!(session = %self.id, error = %e, "transcript extraction failed");
                        Phase::Failed(e.to_string())
                    }
                };
                result
            })
            .await
    }

    pub fn cached_transcript(&self) -> Option<&TranscriptData> {
        self.transcript.get()
    }

    /// Summary of the given type, generated at most once per session.
    pub async fn summary<P, B>(
        &self,
        page: &P,
        config: &ExtractionConfig,
        backend: &B,
        summary_type: SummaryType,
    ) -> Result<String>
    where
        P: Page + ?Sized,
        B: SummaryBackend + ?Sized,
    {
        if let Some(cached) = self.cached_summary(summary_type) {
            debug!(session = %self.id, %summary_type, "using cached summary");
            return Ok(cached);
        }

        let transcript = self.transcript(page, config).await?;
        let cell = Arc::clone(lock(&self.summaries).entry(summary_type).or_default());

        let summary = cell
            .get_or_try_init(|| async {
                self.set_summary_phase(summary_type, Phase::Running);
                info!(session = %self.id, %summary_type, "generating summary");
                let result = backend.summarize(transcript.text(), summary_type).await;
                self.set_summary_phase(
                    summary_type,
                    match &result {
                        Ok(_) => Phase::Ready,
                        Err(e) => Phase::Failed(e.to_string()),
                    },
                );
                result
            })
            .await?;

        Ok(summary.clone())
    }

    pub fn cached_summary(&self, summary_type: SummaryType) -> Option<String> {
        lock(&self.summaries)
            .get(&summary_type)
            .and_then(|cell| cell.get().cloned())
    }

    pub fn extraction_phase(&self) -> Phase {
        lock(&self.extraction).clone()
    }

    pub fn summary_phase(&self, summary_type: SummaryType) -> Phase {
        lock(&self.summary_phases)
            .get(&summary_type)
            .cloned()
            .unwrap_or_default()
    }

    fn set_summary_phase(&self, summary_type: SummaryType, phase: Phase) {
        lock(&self.summary_phases).insert(summary_type, phase);
    }
}
