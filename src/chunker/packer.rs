use super::{splitter::split_oversized, validate_max_tokens, ChunkError};
use crate::tokenizer::{TokenCounter, TokenizerError};

/// Fragments accepted into the chunk being built
struct ChunkBuffer<T> {
    fragments: Vec<T>,
    tokens: usize,
}

impl<T: AsRef<str>> ChunkBuffer<T> {
    fn new() -> Self {
        Self {
            fragments: Vec::new(),
            tokens: 0,
        }
    }

    fn push(&mut self, fragment: T, tokens: usize) {
        self.fragments.push(fragment);
        self.tokens = self.tokens.saturating_add(tokens);
    }

    /// Join the buffered fragments into one chunk and reset.
    /// An empty buffer emits nothing.
    fn flush_into(&mut self, chunks: &mut Vec<String>) {
        if self.fragments.is_empty() {
            return;
        }

        let text = self
            .fragments
            .iter()
            .map(|f| f.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        chunks.push(text);

        self.fragments.clear();
        self.tokens = 0;
    }
}

/// Greedily pack `items` into chunks of at most `max_tokens` tokens.
///
/// Single forward pass, one `count` call per item:
/// - an item over budget on its own flushes the buffer and is handed to
///   `overflow`, whose chunks go straight to the output
/// - an item that would push the buffer over budget flushes it first
/// - anything else is appended to the buffer
///
/// Blank items are skipped so no chunk is ever empty. Errors from `count`
/// or `overflow` abort the pass; nothing partial is returned.
pub fn pack_by_budget<T, I, C, O>(
    items: I,
    max_tokens: usize,
    mut count: C,
    mut overflow: O,
) -> Result<Vec<String>, ChunkError>
where
    T: AsRef<str>,
    I: IntoIterator<Item = T>,
    C: FnMut(&T) -> Result<usize, TokenizerError>,
    O: FnMut(T) -> Result<Vec<String>, ChunkError>,
{
    let mut chunks = Vec::new();
    let mut buffer = ChunkBuffer::new();

    for item in items {
        if item.as_ref().trim().is_empty() {
            continue;
        }

        let item_tokens = count(&item)?;

        if item_tokens > max_tokens {
            buffer.flush_into(&mut chunks);
            chunks.extend(overflow(item)?);
            continue;
        }

        if buffer.tokens.saturating_add(item_tokens) > max_tokens {
            buffer.flush_into(&mut chunks);
        }

        buffer.push(item, item_tokens);
    }

    buffer.flush_into(&mut chunks);

    Ok(chunks)
}

/// Pack sentences into chunks, splitting any over-budget sentence at word
/// granularity.
pub fn pack<'a, S, C>(
    sentences: S,
    counter: &C,
    max_tokens: usize,
) -> Result<Vec<String>, ChunkError>
where
    S: IntoIterator<Item = &'a str>,
    C: TokenCounter + ?Sized,
{
    validate_max_tokens(max_tokens)?;

    pack_by_budget(
        sentences,
        max_tokens,
        |sentence| counter.count_tokens(sentence),
        |sentence| split_oversized(sentence, counter, max_tokens),
    )
}
