pub mod debounce;
pub mod events;
pub mod panel;
pub mod render;

pub use debounce::Debouncer;
pub use events::{Controller, PanelEffect, PanelEvent};
pub use panel::{PanelError, PanelState, SummaryView, Tab, Theme, TranscriptView, detect_theme};
pub use render::{download_filename, escape_html, summary_html, transcript_html};
