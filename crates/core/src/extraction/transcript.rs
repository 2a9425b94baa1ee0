use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{
    error::{RecapError, Result},
    grouping::{RawSegment, bucket_width, effective_duration, group_segments},
    page::{Element, Page},
    poll::Poll,
    types::TranscriptData,
};

pub const SEGMENT_SELECTOR: &str = "ytd-transcript-segment-renderer";
const SEGMENT_TIMESTAMP: &str = ".segment-timestamp";
const SEGMENT_TEXT: &str = ".segment-text";
const MENU_ITEM_SELECTOR: &str = "button, ytd-menu-service-item-renderer";

const CONTAINER_SELECTORS: &[&str] = &[
    "#segments-container",
    "ytd-transcript-segment-list-renderer #segments-container",
    "[id=\"segments-container\"]",
    "ytd-engagement-panel-section-list-renderer[target-id=\"engagement-panel-searchable-transcript\"] #content",
];

/// Timings for opening the transcript panel and draining its lazy list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Pause before looking for the transcript buttons.
    pub settle_delay: Duration,
    /// Polling after clicking a control that should open the panel.
    pub open_poll: Poll,
    /// Pause for the overflow menu to render.
    pub menu_delay: Duration,
    /// Last-resort wait for segments to show up on their own.
    pub fallback_poll: Poll,
    /// Scroll-and-sample loop over the segment list.
    pub scroll_poll: Poll,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            open_poll: Poll::new(Duration::from_millis(300), 15),
            menu_delay: Duration::from_millis(500),
            fallback_poll: Poll::new(Duration::from_millis(500), 20),
            scroll_poll: Poll::new(Duration::from_millis(150), 60).stable_after(4),
        }
    }
}

#[derive(Debug, Default)]
struct PanelOutcome {
    clicked: bool,
    opened: bool,
}

fn is_transcript_button(el: &Element) -> bool {
    el.attr("aria-label") == Some("Transcript")
        || el.text.trim().eq_ignore_ascii_case("transcript")
}

fn is_more_actions_button(el: &Element) -> bool {
    el.attr("aria-label")
        .is_some_and(|label| label.contains("More actions"))
}

fn is_show_transcript_item(el: &Element) -> bool {
    el.text.to_lowercase().contains("show transcript")
}

fn is_close_transcript_button(el: &Element) -> bool {
    let label = el.attr("aria-label").unwrap_or_default().to_lowercase();
    label.contains("close") && label.contains("transcript")
}

pub struct TranscriptExtractor<'a, P: Page + ?Sized> {
    page: &'a P,
    config: &'a ExtractionConfig,
}

impl<'a, P: Page + ?Sized> TranscriptExtractor<'a, P> {
    pub fn new(page: &'a P, config: &'a ExtractionConfig) -> Self {
        Self { page, config }
    }

    /// Read the whole transcript off the page and group it into buckets.
    ///
    /// Opens the transcript panel when it is collapsed and closes it again
    /// afterwards, but only if this call opened it.
    pub async fn extract(&self) -> Result<TranscriptData> {
        let video = self
            .page
            .video()
            .await
            .ok_or(RecapError::VideoElementMissing)?;
        let bucket = bucket_width(effective_duration(video.duration));
        info!(bucket, "starting client-side transcript extraction");

        let mut outcome = PanelOutcome::default();
        if self.page.count(SEGMENT_SELECTOR).await == 0 {
            outcome = self.open_panel().await;

            if !outcome.opened && !self.wait_for_segments(&self.config.fallback_poll).await {
                return Err(RecapError::no_transcript(
                    "No transcript available for this video.",
                ));
            }
        }

        self.drain_lazy_list().await;

        let segments = self.read_segments().await;
        let transcript = group_segments(&segments, bucket)?;

        if outcome.clicked {
            self.close_panel().await;
        }

        info!(
            segments = segments.len(),
            entries = transcript.entries().len(),
            "client-side extraction successful"
        );
        Ok(transcript)
    }

    async fn wait_for_segments(&self, poll: &Poll) -> bool {
        let page = self.page;
        poll.until(move || async move {
            (page.count(SEGMENT_SELECTOR).await > 0).then_some(())
        })
        .await
        .is_some()
    }

    async fn open_panel(&self) -> PanelOutcome {
        let mut outcome = PanelOutcome::default();
        sleep(self.config.settle_delay).await;
        let buttons = self.page.query_all("button").await;

        if let Some(button) = buttons.iter().find(|b| is_transcript_button(b)) {
            debug!("clicking transcript button");
            self.page.click(button.handle).await;
            outcome.clicked = true;
            outcome.opened = self.wait_for_segments(&self.config.open_poll).await;
        }

        if outcome.opened {
            return outcome;
        }

        let Some(more) = buttons.iter().find(|b| is_more_actions_button(b)) else {
            return outcome;
        };
        debug!("opening overflow menu");
        self.page.click(more.handle).await;
        sleep(self.config.menu_delay).await;

        let items = self.page.query_all(MENU_ITEM_SELECTOR).await;
        if let Some(item) = items.iter().find(|i| is_show_transcript_item(i)) {
            debug!("clicking show transcript menu item");
            self.page.click(item.handle).await;
            outcome.clicked = true;
            outcome.opened = self.wait_for_segments(&self.config.open_poll).await;
        }
        outcome
    }

    async fn drain_lazy_list(&self) {
        let Some(container) = self.page.query_first_of(CONTAINER_SELECTORS).await else {
            debug!("no transcript scroll container, using rendered segments");
            return;
        };
        let page = self.page;
        let handle = container.handle;
        let initial = page.count(SEGMENT_SELECTOR).await;
        let settled = self
            .config
            .scroll_poll
            .until_stable(
                initial,
                move || async move { page.scroll_to_bottom(handle).await },
                move || async move { page.count(SEGMENT_SELECTOR).await },
            )
            .await;
        debug!(initial, settled, "segment list settled");
    }

    async fn read_segments(&self) -> Vec<RawSegment> {
        let mut segments = Vec::new();
        for seg in self.page.query_all(SEGMENT_SELECTOR).await {
            let timestamp = self
                .page
                .query_within(seg.handle, SEGMENT_TIMESTAMP)
                .await
                .and_then(|el| el.trimmed_text().map(str::to_string))
                .unwrap_or_else(|| "0:00".to_string());
            let text = self
                .page
                .query_within(seg.handle, SEGMENT_TEXT)
                .await
                .map(|el| el.text.trim().to_string())
                .unwrap_or_default();
            segments.push(RawSegment { timestamp, text });
        }
        segments
    }

    async fn close_panel(&self) {
        let buttons = self.page.query_all("button").await;
        match buttons.iter().find(|b| is_close_transcript_button(b)) {
            Some(close) => self.page.click(close.handle).await,
            None => warn!("opened the transcript panel but found no close button"),
        }
    }
}
