//! Entry point of the content side: owns the active session and the panel,
//! and drives extraction → summarization → render.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{error, info, warn};

use crate::{
    client::SummaryBackend,
    config::RecapConfig,
    extraction::{extract_chapters, extract_description},
    navigation::NavigationMessage,
    page::Page,
    session::Session,
    types::{SummaryType, TranscriptData, VideoDataPayload},
    ui::panel::{PanelState, detect_theme},
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct Orchestrator<P, B> {
    inner: Arc<OrchestratorInner<P, B>>,
}

impl<P, B> Clone for Orchestrator<P, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct OrchestratorInner<P, B> {
    page: Arc<P>,
    backend: Arc<B>,
    config: RecapConfig,
    session: RwLock<Option<Arc<Session>>>,
    panel: Mutex<PanelState>,
    init_task: Mutex<Option<AbortHandle>>,
}

impl<P, B> Orchestrator<P, B>
where
    P: Page + 'static,
    B: SummaryBackend + 'static,
{
    pub fn new(page: Arc<P>, backend: Arc<B>, config: RecapConfig) -> Self {
        Self {
            inner: Arc::new(OrchestratorInner {
                page,
                backend,
                config,
                session: RwLock::new(None),
                panel: Mutex::new(PanelState::default()),
                init_task: Mutex::new(None),
            }),
        }
    }

    pub fn page(&self) -> &Arc<P> {
        &self.inner.page
    }

    pub fn config(&self) -> &RecapConfig {
        &self.inner.config
    }

    pub fn current_session(&self) -> Option<Arc<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn current_video_id(&self) -> Option<String> {
        self.current_session().map(|s| s.video_id().to_string())
    }

    /// Snapshot of the panel for the host to render.
    pub fn panel(&self) -> PanelState {
        lock(&self.inner.panel).clone()
    }

    pub(crate) fn update_panel(&self, f: impl FnOnce(&mut PanelState)) {
        f(&mut lock(&self.inner.panel));
    }

    fn is_current(&self, session: &Arc<Session>) -> bool {
        self.current_session()
            .is_some_and(|current| Arc::ptr_eq(&current, session))
    }

    /// Match the panel theme to the page's.
    pub async fn initialize_ui(&self) {
        let theme = detect_theme(self.inner.page.as_ref()).await;
        self.update_panel(|panel| panel.theme = theme);
    }

    /// React to a navigation message. Returns the initialization task when
    /// the message switched to a new video.
    pub fn handle_navigation(&self, message: &NavigationMessage) -> Option<JoinHandle<()>> {
        let video_id = message.video_id()?;
        if self.current_video_id().as_deref() == Some(video_id.as_str()) {
            return None;
        }
        Some(self.initialize(video_id))
    }

    /// Start over for `video_id`: fresh session, reset panel, then extract and
    /// summarize in the background. Any previous initialization is aborted.
    pub fn initialize(&self, video_id: impl Into<String>) -> JoinHandle<()> {
        let session = Arc::new(Session::new(video_id));
        info!(session = %session.id(), video_id = %session.video_id(), "initializing summarizer");

        *self
            .inner
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&session));
        self.update_panel(PanelState::reset);

        let this = self.clone();
        let handle = tokio::spawn(async move { this.run_initialization(session).await });

        if let Some(previous) = lock(&self.inner.init_task).replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    /// Re-run initialization for the current video with empty caches.
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        let video_id = self.current_video_id()?;
        Some(self.initialize(video_id))
    }

    async fn run_initialization(&self, session: Arc<Session>) {
        session.metadata(self.inner.page.as_ref()).await;

        if self.load_transcript(&session).await.is_none() {
            return;
        }

        if self.inner.config.store_video_data {
            self.spawn_store(Arc::clone(&session));
        }

        self.summarize_in(&session, self.inner.config.default_summary)
            .await;
    }

    /// Transcript for the current video, extracting it on first use.
    ///
    /// Failures are shown in the panel and yield `None`.
    pub async fn transcript(&self) -> Option<TranscriptData> {
        let session = self.current_session()?;
        self.load_transcript(&session).await
    }

    async fn load_transcript(&self, session: &Arc<Session>) -> Option<TranscriptData> {
        if let Some(cached) = session.cached_transcript() {
            return Some(cached.clone());
        }

        self.update_panel(|panel| panel.set_loading(true));
        let result = session
            .transcript(self.inner.page.as_ref(), &self.inner.config.extraction)
            .await
            .cloned();

        if !self.is_current(session) {
            return None;
        }
        match result {
            Ok(transcript) => {
                self.update_panel(|panel| panel.set_loading(false));
                Some(transcript)
            }
            Err(e) => {
                error!(video_id = %session.video_id(), error = %e, "transcript unavailable");
                self.update_panel(|panel| panel.show_error(e.to_string(), e.offers_retry()));
                None
            }
        }
    }

    /// Generate (or reuse) a summary for the current video and show it.
    pub async fn generate_summary(&self, summary_type: SummaryType) -> Option<String> {
        let session = self.current_session()?;
        self.summarize_in(&session, summary_type).await
    }

    async fn summarize_in(&self, session: &Arc<Session>, summary_type: SummaryType) -> Option<String> {
        if let Some(cached) = session.cached_summary(summary_type) {
            self.update_panel(|panel| panel.show_summary(&cached));
            return Some(cached);
        }

        self.load_transcript(session).await?;

        self.update_panel(|panel| panel.show_generating(summary_type));
        let result = session
            .summary(
                self.inner.page.as_ref(),
                &self.inner.config.extraction,
                self.inner.backend.as_ref(),
                summary_type,
            )
            .await;

        if !self.is_current(session) {
            return None;
        }
        match result {
            Ok(summary) => {
                self.update_panel(|panel| panel.show_summary(&summary));
                Some(summary)
            }
            Err(e) => {
                error!(%summary_type, error = %e, "summary generation failed");
                self.update_panel(|panel| panel.show_error(format!("Error: {e}"), false));
                None
            }
        }
    }

    fn spawn_store(&self, session: Arc<Session>) {
        let page = Arc::clone(&self.inner.page);
        let backend = Arc::clone(&self.inner.backend);
        tokio::spawn(async move {
            let Some(transcript) = session.cached_transcript() else {
                warn!("store requested before transcript extraction");
                return;
            };
            let chapters = extract_chapters(page.as_ref()).await;
            let description = extract_description(page.as_ref()).await;
            let payload = VideoDataPayload::new(
                session.video_id(),
                session.cached_metadata().cloned(),
                description,
                chapters,
                transcript,
            );
            backend.store_video_data(&payload).await;
        });
    }
}
