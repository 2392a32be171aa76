use super::{packer::pack_by_budget, validate_max_tokens, ChunkError};
use crate::tokenizer::TokenCounter;
use tracing::debug;

/// Split a sentence that exceeds `max_tokens` by packing its words.
///
/// Uses the same accumulate-or-flush rule as sentence packing. A single word
/// that is over budget by itself is still emitted as its own chunk; there is
/// no sub-word splitting, so that chunk is the one allowed to exceed the
/// limit.
pub fn split_oversized<C>(
    sentence: &str,
    counter: &C,
    max_tokens: usize,
) -> Result<Vec<String>, ChunkError>
where
    C: TokenCounter + ?Sized,
{
    validate_max_tokens(max_tokens)?;

    pack_by_budget(
        sentence.split_whitespace(),
        max_tokens,
        |word| counter.count_tokens(word),
        |word| {
            debug!(
                word_len = word.len(),
                max_tokens, "word exceeds token budget, emitting as its own chunk"
            );
            Ok(vec![word.to_string()])
        },
    )
}
