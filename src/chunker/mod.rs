mod error;
mod packer;
mod splitter;

#[cfg(test)]
mod tests;

pub use error::ChunkError;
pub use packer::{pack, pack_by_budget};
pub use splitter::split_oversized;

use crate::config::ChunkerConfig;
use crate::segmenter::{PunctuationSegmenter, Segmenter};
use crate::tokenizer::TokenCounter;
use std::sync::Arc;
use tracing::debug;

/// Maximum target tokens per chunk, sized for common embedding models
pub const DEFAULT_MAX_TOKENS: usize = 512;

pub(crate) fn validate_max_tokens(max_tokens: usize) -> Result<(), ChunkError> {
    if max_tokens == 0 {
        return Err(ChunkError::InvalidConfiguration(
            "max_tokens must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Chunk `text` with the default punctuation segmenter.
///
/// Empty or blank input yields an empty sequence, not an error.
pub fn chunk_text<C>(
    text: &str,
    counter: &C,
    max_tokens: usize,
) -> Result<Vec<String>, ChunkError>
where
    C: TokenCounter + ?Sized,
{
    validate_max_tokens(max_tokens)?;
    pack(PunctuationSegmenter.segment(text), counter, max_tokens)
}

/// Segmenter, token counter and budget bundled for repeated use
///
/// Holds no per-document state; one instance can chunk many documents,
/// including concurrently.
pub struct Chunker {
    max_tokens: usize,
    segmenter: Box<dyn Segmenter>,
    counter: Arc<dyn TokenCounter>,
}

impl Chunker {
    /// Create a chunker using the punctuation segmenter.
    /// Fails fast on an invalid budget.
    pub fn new(
        config: &ChunkerConfig,
        counter: Arc<dyn TokenCounter>,
    ) -> Result<Self, ChunkError> {
        config.validate()?;

        Ok(Self {
            max_tokens: config.max_tokens,
            segmenter: Box::new(PunctuationSegmenter),
            counter,
        })
    }

    /// Replace the segmentation strategy
    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Split `text` into an ordered sequence of chunks
    pub fn chunk(&self, text: &str) -> Result<Vec<String>, ChunkError> {
        let sentences = self.segmenter.segment(text);
        let sentence_count = sentences.len();

        let chunks = pack(sentences, self.counter.as_ref(), self.max_tokens)?;

        debug!(
            sentences = sentence_count,
            chunks = chunks.len(),
            max_tokens = self.max_tokens,
            "chunked text"
        );

        Ok(chunks)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }
}
