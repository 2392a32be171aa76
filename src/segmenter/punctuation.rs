use super::{push_trimmed, Segmenter};
use once_cell::sync::Lazy;
use regex::Regex;

// Terminal mark followed by a whitespace run. The mark stays with the
// sentence before it; the whitespace is dropped.
// Abbreviations ("Dr. Smith") and decimals followed by a space split too.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("Invalid sentence boundary pattern"));

/// Punctuation-heuristic sentence splitter (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl Segmenter for PunctuationSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_BOUNDARY.find_iter(text) {
            // Terminal marks are single-byte ASCII
            let end = boundary.start() + 1;
            push_trimmed(&mut sentences, &text[start..end]);
            start = boundary.end();
        }

        // Trailing text without terminal punctuation
        push_trimmed(&mut sentences, &text[start..]);

        sentences
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}
