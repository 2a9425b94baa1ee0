//! View model of the injected panel.
//!
//! The host renders whatever this describes; nothing here touches the DOM.

use crate::{
    page::Page,
    types::{SummaryType, TranscriptEntry},
    ui::render::{summary_html, transcript_html},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Summary,
    Transcript,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Follow the page's own dark mode.
pub async fn detect_theme<P: Page + ?Sized>(page: &P) -> Theme {
    if page
        .query_first_of(&["html[dark]", "html[dark=\"true\"]", "body.dark-mode"])
        .await
        .is_some()
    {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SummaryView {
    #[default]
    Initial,
    Generating(SummaryType),
    Ready {
        text: String,
        html: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TranscriptView {
    #[default]
    Initial,
    Loading,
    Ready {
        html: String,
    },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    pub message: String,
    pub retry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub tab: Tab,
    pub theme: Theme,
    pub filter: Option<SummaryType>,
    pub loading: bool,
    pub summary: SummaryView,
    pub transcript: TranscriptView,
    pub error: Option<PanelError>,
    pub copy_visible: bool,
    pub download_visible: bool,
}

impl PanelState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Back to the initial view for a new video. Theme and tab survive.
    pub fn reset(&mut self) {
        *self = Self {
            tab: self.tab,
            theme: self.theme,
            ..Self::default()
        };
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.error = None;
        }
    }

    pub fn show_generating(&mut self, summary_type: SummaryType) {
        self.summary = SummaryView::Generating(summary_type);
        self.set_loading(true);
    }

    pub fn show_summary(&mut self, text: &str) {
        self.summary = SummaryView::Ready {
            text: text.to_string(),
            html: summary_html(text),
        };
        self.loading = false;
        self.error = None;
        self.copy_visible = true;
    }

    pub fn show_transcript_loading(&mut self) {
        self.transcript = TranscriptView::Loading;
    }

    pub fn show_transcript(&mut self, entries: &[TranscriptEntry]) {
        self.transcript = TranscriptView::Ready {
            html: transcript_html(entries),
        };
        self.error = None;
        self.copy_visible = true;
        self.download_visible = true;
    }

    pub fn show_transcript_unavailable(&mut self) {
        self.transcript = TranscriptView::Unavailable;
        self.copy_visible = false;
        self.download_visible = false;
    }

    pub fn show_error(&mut self, message: impl Into<String>, retry: bool) {
        self.error = Some(PanelError {
            message: message.into(),
            retry,
        });
        self.loading = false;
        if matches!(self.summary, SummaryView::Generating(_)) {
            self.summary = SummaryView::Initial;
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Summary {
            let ready = self.summary_text().is_some();
            self.copy_visible = ready;
            self.download_visible = ready;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn set_filter(&mut self, summary_type: SummaryType) {
        self.filter = Some(summary_type);
    }

    pub fn summary_text(&self) -> Option<&str> {
        match &self.summary {
            SummaryView::Ready { text, .. } => Some(text),
            _ => None,
        }
    }
}
