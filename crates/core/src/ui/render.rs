use std::sync::LazyLock;

use regex::Regex;

use crate::{timestamp::timestamp_to_seconds, types::TranscriptEntry};

const MAX_FILENAME_TITLE: usize = 150;

static KEY_INSIGHTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Key Insights:").expect("key insights regex"));
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("filename regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML fragment for the summary pane.
pub fn summary_html(summary: &str) -> String {
    let html = escape_html(summary).replace('\n', "<br>").replace('•', "<br>•");
    KEY_INSIGHTS
        .replacen(&html, 1, "<strong>Key Insights:</strong>")
        .into_owned()
}

/// HTML fragment for the transcript pane; each label seeks the video on click.
pub fn transcript_html(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let seconds = timestamp_to_seconds(&entry.timestamp).unwrap_or(0);
            format!(
                "<span class=\"timestamp\" data-time=\"{}\" style=\"cursor: pointer; color: #065fd4; font-weight: 500;\">{}</span> {}",
                seconds,
                escape_html(&entry.timestamp),
                escape_html(&entry.text)
            )
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// File name for a downloaded summary or transcript, e.g. `summary_My_Video.txt`.
pub fn download_filename(title: Option<&str>, fallback_id: Option<&str>, kind: &str) -> String {
    let fallback = format!("{kind}_data");
    let title = title
        .filter(|t| !t.is_empty())
        .or(fallback_id.filter(|id| !id.is_empty()))
        .unwrap_or(fallback.as_str());

    let stripped = UNSAFE_FILENAME_CHARS.replace_all(title, "");
    let underscored = WHITESPACE.replace_all(&stripped, "_");
    let clean: String = underscored.chars().take(MAX_FILENAME_TITLE).collect();
    format!("{kind}_{clean}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_breaks_lines_and_bullets() {
        let html = summary_html("key insights: one\n• two");
        assert_eq!(html, "<strong>Key Insights:</strong> one<br><br>• two");
    }

    #[test]
    fn summary_is_escaped() {
        assert_eq!(summary_html("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn transcript_spans_carry_seconds() {
        let html = transcript_html(&[
            TranscriptEntry::new("0:00", "hello"),
            TranscriptEntry::new("1:30", "a < b"),
        ]);
        let parts: Vec<_> = html.split("<br>").collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains("data-time=\"0\""));
        assert!(parts[1].contains("data-time=\"90\""));
        assert!(parts[1].ends_with("</span> a &lt; b"));
    }

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(
            download_filename(Some("Rust: The   Good Parts!"), Some("abc"), "summary"),
            "summary_Rust_The_Good_Parts.txt"
        );
    }

    #[test]
    fn filename_falls_back() {
        assert_eq!(download_filename(None, Some("abc123"), "transcript"), "transcript_abc123.txt");
        assert_eq!(download_filename(Some(""), None, "summary"), "summary_summary_data.txt");
    }

    #[test]
    fn filename_title_is_capped() {
        let long = "a".repeat(400);
        let name = download_filename(Some(&long), None, "summary");
        assert_eq!(name.len(), "summary_".len() + 150 + ".txt".len());
    }
}
