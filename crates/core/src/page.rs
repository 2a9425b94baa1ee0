//! The seam between extraction logic and a live watch page.
//!
//! A browser host implements [`Page`] over the real DOM. Everything in this
//! crate reads the page only through it.

use std::collections::HashMap;

use async_trait::async_trait;

/// Opaque handle to a node owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Snapshot of a node at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub handle: ElementHandle,
    pub text: String,
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn new(handle: u64, text: impl Into<String>) -> Self {
        Self {
            handle: ElementHandle(handle),
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Trimmed text content, `None` when blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        let t = self.text.trim();
        (!t.is_empty()).then_some(t)
    }

    pub fn href(&self) -> Option<&str> {
        self.attr("href")
    }
}

/// State of the page's `<video>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    /// Reported duration; `None` or NaN while metadata is still loading.
    pub duration: Option<f64>,
}

#[async_trait]
pub trait Page: Send + Sync {
    /// All nodes matching a CSS selector, in document order.
    async fn query_all(&self, selector: &str) -> Vec<Element>;

    /// First node matching `selector` inside `parent`.
    async fn query_within(&self, parent: ElementHandle, selector: &str) -> Option<Element>;

    async fn click(&self, element: ElementHandle);

    /// Scroll a container to its full scroll height.
    async fn scroll_to_bottom(&self, element: ElementHandle);

    async fn video(&self) -> Option<VideoInfo>;

    async fn seek_video(&self, seconds: f64);

    /// Resume playback, e.g. after a seek from the transcript view.
    async fn play_video(&self);

    /// Current page URL.
    async fn location(&self) -> String;

    async fn query(&self, selector: &str) -> Option<Element> {
        self.query_all(selector).await.into_iter().next()
    }

    /// First node matched by the earliest selector that matches anything.
    async fn query_first_of(&self, selectors: &[&str]) -> Option<Element> {
        for selector in selectors {
            if let Some(el) = self.query(selector).await {
                return Some(el);
            }
        }
        None
    }

    /// Trimmed, non-empty text of the first selector that yields some.
    async fn text_of_first(&self, selectors: &[&str]) -> Option<String> {
        for selector in selectors {
            if let Some(text) = self
                .query(selector)
                .await
                .and_then(|el| el.trimmed_text().map(str::to_string))
            {
                return Some(text);
            }
        }
        None
    }

    async fn count(&self, selector: &str) -> usize {
        self.query_all(selector).await.len()
    }
}
