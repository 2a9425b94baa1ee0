use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::info;
use url::Url;

use crate::{
    grouping::effective_duration,
    page::{Element, Page},
    timestamp::format_duration,
    types::{
        ChannelInfo, ContentInfo, Engagement, MetadataContext, SocialLinks, VideoMetadata,
    },
};

const TITLE_SELECTORS: &[&str] = &["h1.ytd-watch-metadata yt-formatted-string", "h1.title"];
const CHANNEL_LINK_SELECTORS: &[&str] = &[
    "ytd-channel-name#channel-name yt-formatted-string a",
    "#channel-name a",
];
const SUBSCRIBER_SELECTORS: &[&str] = &[
    "#subscriber-count",
    "ytd-subscribe-button-renderer #owner-sub-count",
];
const LIKE_BUTTON_SELECTORS: &[&str] = &[
    "like-button-view-model button[aria-label*=\"like\"]",
    "ytd-toggle-button-renderer.ytd-menu-renderer button[aria-label*=\"like\"]",
];
const VIEW_COUNT_SELECTORS: &[&str] = &[
    "ytd-video-view-count-renderer .view-count",
    "#info span.view-count",
];
const UPLOAD_DATE_SELECTORS: &[&str] = &[
    "#info-strings yt-formatted-string",
    "#date yt-formatted-string",
];
const SOCIAL_LINK_SELECTOR: &str = "ytd-channel-tagline-renderer a, #link-list-container a";

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,]+").expect("digits regex"));

/// Like count from a like button's aria-label, e.g. "like this video along with 1,234 other people".
pub fn parse_like_count(aria_label: &str) -> Option<String> {
    DIGITS
        .find(aria_label)
        .map(|m| m.as_str().replace(',', ""))
}

/// `v` query parameter of a watch URL, empty when absent.
pub fn video_id_from_location(location: &str) -> String {
    Url::parse(location)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_default()
}

fn classify_social_links(links: &[Element]) -> Option<SocialLinks> {
    let mut social = SocialLinks::default();
    for link in links {
        let Some(href) = link.href() else { continue };
        let text = link.text.to_lowercase();
        let slot = if href.contains("instagram.com") {
            &mut social.instagram
        } else if href.contains("tiktok.com") {
            &mut social.tiktok
        } else if href.contains("twitter.com") || href.contains("x.com") {
            &mut social.twitter
        } else if href.contains("facebook.com") {
            &mut social.facebook
        } else if text.contains("website") || text.contains("site") {
            &mut social.website
        } else {
            continue;
        };
        *slot = Some(href.to_string());
    }
    (!social.is_empty()).then_some(social)
}

/// Read title, channel, engagement counters and social links off the page.
///
/// Never fails: missing fields fall back to sentinel values.
pub async fn extract_metadata<P: Page + ?Sized>(page: &P) -> VideoMetadata {
    info!("extracting essential metadata");
    let duration = effective_duration(page.video().await.and_then(|v| v.duration));

    let like_count = page
        .query_first_of(LIKE_BUTTON_SELECTORS)
        .await
        .and_then(|btn| btn.attr("aria-label").and_then(parse_like_count));

    let channel_link = page.query_first_of(CHANNEL_LINK_SELECTORS).await;
    let channel_name = page
        .text_of_first(CHANNEL_LINK_SELECTORS)
        .await
        .unwrap_or_else(|| "Unknown Channel".to_string());
    let channel_url = channel_link
        .as_ref()
        .and_then(|el| el.href())
        .unwrap_or_default()
        .to_string();

    let social_links = classify_social_links(&page.query_all(SOCIAL_LINK_SELECTOR).await);

    VideoMetadata {
        title: page
            .text_of_first(TITLE_SELECTORS)
            .await
            .unwrap_or_else(|| "Unknown Title".to_string()),
        video_id: video_id_from_location(&page.location().await),
        channel: ChannelInfo {
            name: channel_name,
            url: channel_url,
            subscriber_count: page.text_of_first(SUBSCRIBER_SELECTORS).await,
        },
        content: ContentInfo {
            duration_seconds: duration.floor() as u64,
            duration_formatted: format_duration(duration),
        },
        engagement: Engagement {
            view_count: page
                .text_of_first(VIEW_COUNT_SELECTORS)
                .await
                .unwrap_or_else(|| "Unknown".to_string()),
            upload_date: page
                .text_of_first(UPLOAD_DATE_SELECTORS)
                .await
                .unwrap_or_else(|| "Unknown".to_string()),
            like_count,
        },
        context: MetadataContext { social_links },
        extraction_timestamp: Utc::now(),
    }
}
