use super::{TokenCounter, TokenizerError};

/// Counts whitespace-separated words
///
/// Additive over space-joined fragments, which makes it the reference counter
/// for tests and quick runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        Ok(text.split_whitespace().count())
    }

    fn name(&self) -> &str {
        "words"
    }
}

/// Rough estimate: 1 token per 4 bytes, at least 1 for non-empty text
#[derive(Debug, Clone, Copy, Default)]
pub struct CharEstimateCounter;

impl TokenCounter for CharEstimateCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok((text.len() / 4).max(1))
    }

    fn name(&self) -> &str {
        "chars"
    }
}

/// Adapts a plain closure into a [`TokenCounter`]
pub struct FnCounter<F> {
    name: String,
    count: F,
}

impl<F> FnCounter<F>
where
    F: Fn(&str) -> usize + Send + Sync,
{
    pub fn new(name: impl Into<String>, count: F) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

impl<F> TokenCounter for FnCounter<F>
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        Ok((self.count)(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
