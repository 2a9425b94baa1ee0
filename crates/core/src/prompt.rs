use crate::types::SummaryType;

const INSIGHTS_PROMPT: &str = "You are a YouTube summarizer. Generate a single, concise paragraph (under 20 words) summarizing this transcript. The main idea to look for is how valuable is this video; is it clickbait or superb value of user's time.\n\nTranscript: ";

const CONCISE_PROMPT: &str = "You are a YouTube summarizer. Generate a maximum of five concise bullet points (key insights) of the key insights from this transcript. Use emojis at the start of each point. Focus on main ideas.\n\nTranscript: ";

const DETAILED_PROMPT: &str = "You are a YouTube summarizer. Generate a detailed, multi-paragraph summary (under 450 words) of this transcript, use proper structure and bullet points covering all main topics and supporting details.\n\nTranscript: ";

impl SummaryType {
    /// Fixed instruction preamble for this summary type.
    pub fn prompt_template(&self) -> &'static str {
        match self {
            SummaryType::Insights => INSIGHTS_PROMPT,
            SummaryType::Concise => CONCISE_PROMPT,
            SummaryType::Detailed => DETAILED_PROMPT,
        }
    }
}

/// Full prompt sent upstream: the template followed by the transcript.
pub fn build_prompt(summary_type: SummaryType, transcript: &str) -> String {
    let template = summary_type.prompt_template();
    let mut prompt = String::with_capacity(template.len() + transcript.len());
    prompt.push_str(template);
    prompt.push_str(transcript);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_ends_with_transcript() {
        let prompt = build_prompt(SummaryType::Concise, "[0:00] hello");
        assert!(prompt.starts_with("You are a YouTube summarizer."));
        assert!(prompt.contains("five concise bullet points"));
        assert!(prompt.ends_with("Transcript: [0:00] hello"));
    }

    #[test]
    fn every_type_has_a_distinct_template() {
        let templates: Vec<_> = SummaryType::ALL.iter().map(|t| t.prompt_template()).collect();
        assert_ne!(templates[0], templates[1]);
        assert_ne!(templates[1], templates[2]);
        assert_ne!(templates[0], templates[2]);
    }
}
