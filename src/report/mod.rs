//! Chunk statistics.
//!
//! [`ChunkStats`] is a pure reduction over per-chunk token counts. Console
//! formatting lives in [`render`] and never feeds back into the numbers.

mod render;


pub use render::DocumentReport;

use crate::tokenizer::{TokenCounter, TokenizerError};
use serde::{Deserialize, Serialize};

/// Half-open token-count range `[start, end)`
pub type TokenRange = (usize, usize);

/// Distribution ranges used for a 512-token budget
pub const DEFAULT_RANGES: [TokenRange; 4] = [(0, 128), (128, 256), (256, 384), (384, 512)];

/// Number of chunks whose token count falls in `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

/// Summary statistics for one chunk sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub total_chunks: usize,
    pub total_tokens: usize,
    pub average_tokens: f64,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub histogram: Vec<HistogramBucket>,
    /// Chunks outside every histogram range
    pub unbucketed: usize,
}

impl ChunkStats {
    /// Reduce per-chunk token counts. An empty slice gives all zeros.
    pub fn from_counts(counts: &[usize], ranges: &[TokenRange]) -> Self {
        let total_chunks = counts.len();
        let total_tokens: usize = counts.iter().sum();
        let average_tokens = if total_chunks > 0 {
            total_tokens as f64 / total_chunks as f64
        } else {
            0.0
        };

        let histogram: Vec<HistogramBucket> = ranges
            .iter()
            .map(|&(start, end)| HistogramBucket {
                start,
                end,
                count: counts.iter().filter(|&&c| start <= c && c < end).count(),
            })
            .collect();

        let unbucketed = counts
            .iter()
            .filter(|&&c| !ranges.iter().any(|&(start, end)| start <= c && c < end))
            .count();

        Self {
            total_chunks,
            total_tokens,
            average_tokens,
            min_tokens: counts.iter().copied().min().unwrap_or(0),
            max_tokens: counts.iter().copied().max().unwrap_or(0),
            histogram,
            unbucketed,
        }
    }

    /// Count every chunk with `counter` and reduce
    pub fn compute<S, C>(
        chunks: &[S],
        counter: &C,
        ranges: &[TokenRange],
    ) -> Result<Self, TokenizerError>
    where
        S: AsRef<str>,
        C: TokenCounter + ?Sized,
    {
        let counts = count_chunks(chunks, counter)?;
        Ok(Self::from_counts(&counts, ranges))
    }
}

/// Token count of each chunk, in order
pub fn count_chunks<S, C>(chunks: &[S], counter: &C) -> Result<Vec<usize>, TokenizerError>
where
    S: AsRef<str>,
    C: TokenCounter + ?Sized,
{
    chunks
        .iter()
        .map(|chunk| counter.count_tokens(chunk.as_ref()))
        .collect()
}

/// `buckets` equal-width ranges covering `[0, max_tokens)`.
///
/// The last range ends at `max_tokens`, so a chunk filled exactly to the
/// budget lands in [`ChunkStats::unbucketed`].
pub fn ranges_for_budget(max_tokens: usize, buckets: usize) -> Vec<TokenRange> {
    if max_tokens == 0 || buckets == 0 {
        return Vec::new();
    }

    let width = max_tokens.div_ceil(buckets);
    (0..buckets)
        .map(|i| (i * width, ((i + 1) * width).min(max_tokens)))
        .filter(|&(start, end)| start < end)
        .collect()
}
