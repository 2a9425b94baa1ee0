use std::time::Duration;

use tracing::debug;

use crate::{
    client::SummaryBackend,
    orchestrator::Orchestrator,
    page::Page,
    types::SummaryType,
    ui::{
        debounce::Debouncer,
        panel::{Tab, TranscriptView},
        render::download_filename,
    },
};

const TAB_DEBOUNCE: Duration = Duration::from_millis(500);
const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// User interaction with the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    SelectSummaryTab,
    SelectTranscriptTab,
    Summarize,
    Filter(SummaryType),
    ToggleTheme,
    Copy,
    Download,
    TimestampClicked(f64),
    Retry,
}

/// Side effects only the host can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    CopyToClipboard(String),
    Download { filename: String, text: String },
}

pub struct Controller<P, B> {
    orchestrator: Orchestrator<P, B>,
    tab_debounce: Debouncer,
    filter_debounce: Debouncer,
}

impl<P, B> Controller<P, B>
where
    P: Page + 'static,
    B: SummaryBackend + 'static,
{
    pub fn new(orchestrator: Orchestrator<P, B>) -> Self {
        Self {
            orchestrator,
            tab_debounce: Debouncer::new(TAB_DEBOUNCE),
            filter_debounce: Debouncer::new(FILTER_DEBOUNCE),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<P, B> {
        &self.orchestrator
    }

    pub async fn handle(&self, event: PanelEvent) -> Vec<PanelEffect> {
        debug!(?event, "panel event");
        match event {
            PanelEvent::SelectSummaryTab => {
                self.orchestrator
                    .update_panel(|panel| panel.select_tab(Tab::Summary));
            }
            PanelEvent::SelectTranscriptTab => {
                if self.tab_debounce.settle().await {
                    self.open_transcript_tab().await;
                }
            }
            PanelEvent::Summarize => {
                self.orchestrator
                    .update_panel(|panel| panel.set_filter(SummaryType::Insights));
                self.orchestrator
                    .generate_summary(SummaryType::Insights)
                    .await;
            }
            PanelEvent::Filter(summary_type) => {
                if self.filter_debounce.settle().await {
                    self.orchestrator
                        .update_panel(|panel| panel.set_filter(summary_type));
                    self.orchestrator.generate_summary(summary_type).await;
                }
            }
            PanelEvent::ToggleTheme => {
                self.orchestrator.update_panel(|panel| panel.toggle_theme());
            }
            PanelEvent::Copy => {
                if let Some((_, text)) = self.visible_text() {
                    return vec![PanelEffect::CopyToClipboard(text)];
                }
            }
            PanelEvent::Download => {
                if let Some((kind, text)) = self.visible_text() {
                    let session = self.orchestrator.current_session();
                    let title = session
                        .as_ref()
                        .and_then(|s| s.cached_metadata())
                        .map(|m| m.title.clone());
                    let filename = download_filename(
                        title.as_deref(),
                        session.as_ref().map(|s| s.video_id()),
                        kind,
                    );
                    return vec![PanelEffect::Download { filename, text }];
                }
            }
            PanelEvent::TimestampClicked(seconds) => {
                let page = self.orchestrator.page();
                page.seek_video(seconds).await;
                page.play_video().await;
            }
            PanelEvent::Retry => {
                if let Some(task) = self.orchestrator.retry() {
                    if let Err(e) = task.await {
                        debug!(error = %e, "retry superseded");
                    }
                }
            }
        }
        Vec::new()
    }

    async fn open_transcript_tab(&self) {
        let already_rendered = {
            let panel = self.orchestrator.panel();
            matches!(panel.transcript, TranscriptView::Ready { .. })
        };
        self.orchestrator
            .update_panel(|panel| panel.select_tab(Tab::Transcript));
        if already_rendered {
            return;
        }

        self.orchestrator
            .update_panel(|panel| panel.show_transcript_loading());
        match self.orchestrator.transcript().await {
            Some(transcript) => self
                .orchestrator
                .update_panel(|panel| panel.show_transcript(transcript.entries())),
            None => self
                .orchestrator
                .update_panel(|panel| panel.show_transcript_unavailable()),
        }
    }

    /// Text behind the active tab, with the download kind it maps to.
    fn visible_text(&self) -> Option<(&'static str, String)> {
        let panel = self.orchestrator.panel();
        match panel.tab {
            Tab::Summary => panel
                .summary_text()
                .map(|text| ("summary", text.to_string())),
            Tab::Transcript => self
                .orchestrator
                .current_session()
                .and_then(|s| s.cached_transcript().map(|t| t.text().to_string()))
                .map(|text| ("transcript", text)),
        }
    }
}
