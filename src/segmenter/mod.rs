mod line;
mod punctuation;

#[cfg(test)]
mod tests;

pub use line::LineSegmenter;
pub use punctuation::PunctuationSegmenter;

use serde::{Deserialize, Serialize};

/// Splits document text into ordered sentence-like units
///
/// Returned slices borrow from the input, are trimmed, never empty, and
/// appear in document order. The packer depends on nothing else, so a
/// stronger segmenter can be swapped in without touching it.
pub trait Segmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Name used in logs and manifests
    fn name(&self) -> &'static str;
}

/// Built-in segmentation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// Split after `.`, `!` or `?` followed by whitespace
    #[default]
    Sentence,
    /// Split on line breaks
    Line,
}

impl SegmenterKind {
    pub fn build(self) -> Box<dyn Segmenter> {
        match self {
            Self::Sentence => Box::new(PunctuationSegmenter),
            Self::Line => Box::new(LineSegmenter),
        }
    }
}

impl std::str::FromStr for SegmenterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentence" | "sentences" => Ok(Self::Sentence),
            "line" | "lines" => Ok(Self::Line),
            other => Err(format!("Unknown segmenter: {}", other)),
        }
    }
}

/// Trim `piece` and keep it if anything is left
fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}
