#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use recap_core::{
    Element, ElementHandle, Page, RecapError, Result, SummaryBackend, SummaryType,
    VideoDataPayload, VideoInfo,
};

const TRANSCRIPT_BUTTON: u64 = 1;
const MORE_ACTIONS: u64 = 2;
const SHOW_TRANSCRIPT_ITEM: u64 = 3;
const CLOSE_BUTTON: u64 = 4;
const CONTAINER: u64 = 5;
const SEGMENT_BASE: u64 = 1_000;

/// In-memory watch page with a transcript panel that loads lazily.
pub struct FakePage {
    state: Mutex<State>,
    queries: AtomicUsize,
}

struct State {
    video: Option<VideoInfo>,
    location: String,
    nodes: HashMap<String, Vec<Element>>,
    children: HashMap<(u64, String), Element>,
    segments: Vec<(String, String)>,
    loaded: usize,
    page_size: usize,
    panel_open: bool,
    menu_open: bool,
    transcript_button: bool,
    menu_item: bool,
    clicks: Vec<u64>,
    seeks: Vec<f64>,
    plays: usize,
}

impl FakePage {
    pub fn watch(video_id: &str) -> Self {
        Self {
            state: Mutex::new(State {
                video: Some(VideoInfo {
                    duration: Some(300.0),
                }),
                location: format!("https://www.youtube.com/watch?v={video_id}"),
                nodes: HashMap::new(),
                children: HashMap::new(),
                segments: Vec::new(),
                loaded: 0,
                page_size: usize::MAX,
                panel_open: false,
                menu_open: false,
                transcript_button: false,
                menu_item: false,
                clicks: Vec::new(),
                seeks: Vec::new(),
                plays: 0,
            }),
            queries: AtomicUsize::new(0),
        }
    }

    fn with(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn with_segments(self, segments: &[(&str, &str)]) -> Self {
        let segments = segments
            .iter()
            .map(|(ts, text)| (ts.to_string(), text.to_string()))
            .collect();
        self.with(|s| s.segments = segments)
    }

    /// Transcript panel already expanded when extraction starts.
    pub fn panel_open(self) -> Self {
        self.with(|s| s.open_panel())
    }

    pub fn with_transcript_button(self) -> Self {
        self.with(|s| s.transcript_button = true)
    }

    pub fn with_menu_item(self) -> Self {
        self.with(|s| s.menu_item = true)
    }

    pub fn page_size(self, size: usize) -> Self {
        self.with(|s| s.page_size = size)
    }

    pub fn duration(self, duration: Option<f64>) -> Self {
        self.with(|s| s.video = Some(VideoInfo { duration }))
    }

    pub fn without_video(self) -> Self {
        self.with(|s| s.video = None)
    }

    pub fn with_node(self, selector: &str, element: Element) -> Self {
        self.with(|s| {
            s.nodes
                .entry(selector.to_string())
                .or_default()
                .push(element)
        })
    }

    /// Node found by `query_within(parent, selector)`.
    pub fn with_child(self, parent: u64, selector: &str, element: Element) -> Self {
        self.with(|s| {
            s.children.insert((parent, selector.to_string()), element);
        })
    }

    /// A chapter marker under `selector` with its time and title children.
    pub fn with_chapter(self, selector: &str, handle: u64, time: &str, title: &str) -> Self {
        self.with_node(selector, Element::new(handle, ""))
            .with_child(handle, "#time", Element::new(0, time))
            .with_child(handle, "#details h4", Element::new(0, title))
    }

    pub fn set_segments(&self, segments: &[(&str, &str)]) {
        let mut state = self.state.lock().unwrap();
        state.segments = segments
            .iter()
            .map(|(ts, text)| (ts.to_string(), text.to_string()))
            .collect();
        state.open_panel();
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn clicks(&self) -> Vec<u64> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn transcript_clicks(&self) -> usize {
        self.clicks()
            .into_iter()
            .filter(|h| *h == TRANSCRIPT_BUTTON)
            .count()
    }

    pub fn closed_panel(&self) -> bool {
        self.clicks().contains(&CLOSE_BUTTON)
    }

    pub fn is_panel_open(&self) -> bool {
        self.state.lock().unwrap().panel_open
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.state.lock().unwrap().seeks.clone()
    }

    pub fn plays(&self) -> usize {
        self.state.lock().unwrap().plays
    }
}

impl State {
    fn open_panel(&mut self) {
        self.panel_open = true;
        self.menu_open = false;
        self.loaded = self.page_size.min(self.segments.len());
    }

    fn buttons(&self) -> Vec<Element> {
        let mut buttons = Vec::new();
        if self.transcript_button {
            buttons.push(Element::new(TRANSCRIPT_BUTTON, "").with_attr("aria-label", "Transcript"));
        }
        if self.menu_item {
            buttons.push(Element::new(MORE_ACTIONS, "").with_attr("aria-label", "More actions"));
        }
        if self.panel_open {
            buttons.push(
                Element::new(CLOSE_BUTTON, "").with_attr("aria-label", "Close transcript"),
            );
        }
        buttons
    }

    fn visible_segments(&self) -> Vec<Element> {
        if !self.panel_open {
            return Vec::new();
        }
        (0..self.loaded)
            .map(|i| Element::new(SEGMENT_BASE + i as u64, ""))
            .collect()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn query_all(&self, selector: &str) -> Vec<Element> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        match selector {
            "button" => state.buttons(),
            "button, ytd-menu-service-item-renderer" => {
                let mut items = state.buttons();
                if state.menu_open {
                    items.push(Element::new(SHOW_TRANSCRIPT_ITEM, "Show transcript"));
                }
                items
            }
            "ytd-transcript-segment-renderer" => state.visible_segments(),
            "#segments-container" if state.panel_open => vec![Element::new(CONTAINER, "")],
            other => state.nodes.get(other).cloned().unwrap_or_default(),
        }
    }

    async fn query_within(&self, parent: ElementHandle, selector: &str) -> Option<Element> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if let Some(child) = state.children.get(&(parent.0, selector.to_string())) {
            return Some(child.clone());
        }
        let index = parent.0.checked_sub(SEGMENT_BASE)? as usize;
        let (ts, text) = state.segments.get(index)?;
        match selector {
            ".segment-timestamp" => Some(Element::new(0, ts.clone())),
            ".segment-text" => Some(Element::new(0, text.clone())),
            _ => None,
        }
    }

    async fn click(&self, element: ElementHandle) {
        let mut state = self.state.lock().unwrap();
        state.clicks.push(element.0);
        match element.0 {
            TRANSCRIPT_BUTTON | SHOW_TRANSCRIPT_ITEM if !state.segments.is_empty() => {
                state.open_panel()
            }
            MORE_ACTIONS => state.menu_open = true,
            CLOSE_BUTTON => state.panel_open = false,
            _ => {}
        }
    }

    async fn scroll_to_bottom(&self, _element: ElementHandle) {
        let mut state = self.state.lock().unwrap();
        state.loaded = state
            .loaded
            .saturating_add(state.page_size)
            .min(state.segments.len());
    }

    async fn video(&self) -> Option<VideoInfo> {
        self.state.lock().unwrap().video
    }

    async fn seek_video(&self, seconds: f64) {
        self.state.lock().unwrap().seeks.push(seconds);
    }

    async fn play_video(&self) {
        self.state.lock().unwrap().plays += 1;
    }

    async fn location(&self) -> String {
        self.state.lock().unwrap().location.clone()
    }
}

/// Backend that answers locally and records what it was asked.
#[derive(Default)]
pub struct FakeBackend {
    pub fail_with: Option<String>,
    requests: Mutex<Vec<(SummaryType, String)>>,
    stored: Mutex<Vec<VideoDataPayload>>,
}

impl FakeBackend {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(SummaryType, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_types(&self) -> Vec<SummaryType> {
        self.requests().into_iter().map(|(kind, _)| kind).collect()
    }

    pub fn stored(&self) -> Vec<VideoDataPayload> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryBackend for FakeBackend {
    async fn summarize(&self, transcript_text: &str, summary_type: SummaryType) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((summary_type, transcript_text.to_string()));
        match &self.fail_with {
            Some(message) => Err(RecapError::NetworkFailure {
                reason: message.clone(),
                status: Some(502),
            }),
            None => Ok(format!("{summary_type} summary")),
        }
    }

    async fn store_video_data(&self, payload: &VideoDataPayload) {
        self.stored.lock().unwrap().push(payload.clone());
    }
}
