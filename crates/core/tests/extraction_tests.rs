mod common;

use common::FakePage;
use recap_core::{
    Chapter, Element, ExtractionConfig, RecapError, TranscriptEntry, TranscriptExtractor,
    extraction::{NO_DESCRIPTION, extract_chapters, extract_description, extract_metadata},
};

async fn extract(page: &FakePage) -> recap_core::Result<recap_core::TranscriptData> {
    let config = ExtractionConfig::default();
    TranscriptExtractor::new(page, &config).extract().await
}

#[tokio::test(start_paused = true)]
async fn groups_visible_segments_without_touching_the_panel() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:01", "hello"), ("0:05", "there"), ("0:20", "world")])
        .panel_open();

    let transcript = extract(&page).await.unwrap();

    assert_eq!(
        transcript.entries(),
        &[
            TranscriptEntry::new("0:00", "hello there"),
            TranscriptEntry::new("0:15", "world"),
        ]
    );
    assert_eq!(transcript.text(), "[0:00] hello there\n[0:15] world");
    assert!(page.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn opens_panel_with_transcript_button_and_closes_it() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:03", "intro")])
        .with_transcript_button();

    let transcript = extract(&page).await.unwrap();

    assert_eq!(transcript.entries().len(), 1);
    assert_eq!(page.clicks(), vec![1, 4]);
    assert!(!page.is_panel_open());
}

#[tokio::test(start_paused = true)]
async fn falls_back_to_overflow_menu() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:03", "intro")])
        .with_menu_item();

    extract(&page).await.unwrap();

    assert_eq!(page.clicks(), vec![2, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn fails_when_no_path_reveals_segments() {
    let page = FakePage::watch("abc").with_transcript_button();

    let err = extract(&page).await.unwrap_err();

    assert!(matches!(err, RecapError::NoTranscriptAvailable { .. }));
    assert_eq!(err.to_string(), "No transcript available for this video.");
    assert!(err.offers_retry());
}

#[tokio::test(start_paused = true)]
async fn missing_video_element_is_reported() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:03", "intro")])
        .panel_open()
        .without_video();

    let err = extract(&page).await.unwrap_err();
    assert!(matches!(err, RecapError::VideoElementMissing));
}

#[tokio::test(start_paused = true)]
async fn drains_lazily_loaded_list() {
    let raw: Vec<(String, String)> = (0..50)
        .map(|i| (format!("0:{i:02}"), format!("line{i}")))
        .collect();
    let segments: Vec<(&str, &str)> = raw.iter().map(|(t, x)| (t.as_str(), x.as_str())).collect();
    let page = FakePage::watch("abc")
        .with_segments(&segments)
        .page_size(10)
        .panel_open();

    let transcript = extract(&page).await.unwrap();

    assert_eq!(transcript.entries().len(), 4);
    assert!(transcript.text().ends_with("line49"));
}

#[tokio::test(start_paused = true)]
async fn long_videos_use_minute_buckets() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:10", "a"), ("0:50", "b"), ("1:10", "c"), ("21:59", "d")])
        .duration(Some(1500.0))
        .panel_open();

    let transcript = extract(&page).await.unwrap();

    let labels: Vec<_> = transcript
        .entries()
        .iter()
        .map(|e| e.timestamp.as_str())
        .collect();
    assert_eq!(labels, vec!["0:00", "1:00", "21:00"]);
}

#[tokio::test(start_paused = true)]
async fn unknown_duration_falls_back_to_ten_minutes() {
    let page = FakePage::watch("abc")
        .with_segments(&[("0:10", "a"), ("0:40", "b")])
        .duration(None)
        .panel_open();

    let transcript = extract(&page).await.unwrap();
    assert_eq!(
        transcript.entries(),
        &[
            TranscriptEntry::new("0:00", "a"),
            TranscriptEntry::new("0:30", "b")
        ]
    );
}

#[tokio::test]
async fn metadata_uses_sentinels_for_missing_nodes() {
    let page = FakePage::watch("xyz")
        .with_node("h1.title", Element::new(10, "  My Video  "));

    let metadata = extract_metadata(&page).await;

    assert_eq!(metadata.title, "My Video");
    assert_eq!(metadata.video_id, "xyz");
    assert_eq!(metadata.channel.name, "Unknown Channel");
}

#[tokio::test]
async fn page_without_chapters_yields_none() {
    let page = FakePage::watch("xyz");
    assert!(extract_chapters(&page).await.is_empty());
}

const MARKER: &str = "ytd-macro-markers-list-item-renderer";
const STRUCTURED_MARKER: &str = "#structured-description ytd-horizontal-card-list-renderer ytd-macro-markers-list-item-renderer";

fn chapter(timestamp: &str, title: &str) -> Chapter {
    Chapter {
        timestamp: timestamp.to_string(),
        title: title.to_string(),
    }
}

#[tokio::test]
async fn chapters_are_sorted_by_start_time() {
    let page = FakePage::watch("xyz")
        .with_chapter(MARKER, 20, "1:05:00", "Outro")
        .with_chapter(MARKER, 21, " 9:00 ", " Middle ")
        .with_chapter(MARKER, 22, "0:00", "Intro");

    assert_eq!(
        extract_chapters(&page).await,
        vec![
            chapter("0:00", "Intro"),
            chapter("9:00", "Middle"),
            chapter("1:05:00", "Outro"),
        ]
    );
}

#[tokio::test]
async fn later_chapter_with_same_time_wins() {
    let page = FakePage::watch("xyz")
        .with_chapter(MARKER, 20, "0:00", "First title")
        .with_chapter(MARKER, 21, "0:00", "Second title")
        .with_chapter(MARKER, 22, "2:00", "Next");

    assert_eq!(
        extract_chapters(&page).await,
        vec![chapter("0:00", "Second title"), chapter("2:00", "Next")]
    );
}

#[tokio::test]
async fn chapters_fall_back_to_structured_description() {
    let page = FakePage::watch("xyz")
        .with_chapter(STRUCTURED_MARKER, 30, "3:00", "Later")
        .with_chapter(STRUCTURED_MARKER, 31, "0:00", "Start");

    assert_eq!(
        extract_chapters(&page).await,
        vec![chapter("0:00", "Start"), chapter("3:00", "Later")]
    );
}

#[tokio::test]
async fn markers_missing_a_title_are_ignored() {
    let page = FakePage::watch("xyz")
        .with_node(MARKER, Element::new(40, ""))
        .with_child(40, "#time", Element::new(0, "0:30"))
        .with_chapter(MARKER, 41, "1:00", "Titled");

    assert_eq!(extract_chapters(&page).await, vec![chapter("1:00", "Titled")]);
}

#[tokio::test]
async fn description_is_trimmed() {
    let page = FakePage::watch("xyz")
        .with_node("#description", Element::new(50, "\n  Links and credits  \n"));

    assert_eq!(extract_description(&page).await, "Links and credits");
}

#[tokio::test]
async fn blank_or_missing_description_uses_placeholder() {
    let blank = FakePage::watch("xyz").with_node("#description", Element::new(50, "   "));
    assert_eq!(extract_description(&blank).await, NO_DESCRIPTION);

    let missing = FakePage::watch("xyz");
    assert_eq!(extract_description(&missing).await, "No description available.");
}
