use super::*;
use crate::segmenter::LineSegmenter;
use crate::tokenizer::{FnCounter, TokenizerError, WordCounter};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fails on any text containing the word "poison"
struct FailingCounter;

impl TokenCounter for FailingCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        if text.contains("poison") {
            return Err(TokenizerError::Encoding("poisoned input".to_string()));
        }
        Ok(text.split_whitespace().count())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Word counter that records how often it is called
#[derive(Default)]
struct CountingCounter {
    calls: AtomicUsize,
}

impl TokenCounter for CountingCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(text.split_whitespace().count())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn sample_document() -> String {
    [
        "Retrieval pipelines need bounded chunks.",
        "Each chunk is embedded on its own!",
        "Short one.",
        "This particular sentence is deliberately long so that small budgets force the splitter to fall back to packing individual words?",
        "Tiny.",
        "Another medium sized sentence closes the first paragraph.",
        "\n\nA second paragraph starts here. It has three sentences. The last one trails off",
    ]
    .join(" ")
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_two_sentences_fit_in_one_chunk() {
    let chunks = chunk_text("Hello world. This is a test.", &WordCounter, 512).unwrap();
    assert_eq!(chunks, vec!["Hello world. This is a test."]);
}

#[test]
fn test_sentences_split_when_combined_exceed_budget() {
    let chunks = chunk_text("One two three. Four five six.", &WordCounter, 4).unwrap();
    assert_eq!(chunks, vec!["One two three.", "Four five six."]);
}

#[test]
fn test_oversized_sentence_is_word_packed() {
    let sentence = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10.";
    let chunks = chunk_text(sentence, &WordCounter, 3).unwrap();

    assert_eq!(chunks, vec!["w1 w2 w3", "w4 w5 w6", "w7 w8 w9", "w10."]);
    for chunk in &chunks {
        assert!(WordCounter.count_tokens(chunk).unwrap() <= 3);
    }
}

#[test]
fn test_empty_input_yields_no_chunks() {
    assert!(chunk_text("", &WordCounter, 512).unwrap().is_empty());
    assert!(chunk_text("   \n\t ", &WordCounter, 512).unwrap().is_empty());
}

#[test]
fn test_zero_budget_is_rejected() {
    let result = chunk_text("Hello world.", &WordCounter, 0);
    assert!(matches!(result, Err(ChunkError::InvalidConfiguration(_))));

    let result = Chunker::new(&ChunkerConfig::new(0), Arc::new(WordCounter));
    assert!(matches!(result, Err(ChunkError::InvalidConfiguration(_))));

    let result = split_oversized("a b c", &WordCounter, 0);
    assert!(matches!(result, Err(ChunkError::InvalidConfiguration(_))));
}

// ========================================================================
// Packing edge cases
// ========================================================================

#[test]
fn test_exact_fit_stays_in_one_chunk() {
    let chunks = chunk_text("One two. Three four.", &WordCounter, 4).unwrap();
    assert_eq!(chunks, vec!["One two. Three four."]);
}

#[test]
fn test_buffer_flushed_before_oversized_sentence() {
    let text = "Short one. a b c d e f. Tail.";
    let chunks = chunk_text(text, &WordCounter, 4).unwrap();

    // The word chunk "e f." is not merged with the following sentence
    assert_eq!(chunks, vec!["Short one.", "a b c d", "e f.", "Tail."]);
}

#[test]
fn test_single_word_over_budget_is_emitted_alone() {
    let counter = FnCounter::new("chars", |text: &str| text.chars().count());
    let chunks = chunk_text("a supercalifragilistic b.", &counter, 5).unwrap();

    assert_eq!(chunks, vec!["a", "supercalifragilistic", "b."]);
}

#[test]
fn test_over_budget_word_between_small_words() {
    let counter = FnCounter::new("chars", |text: &str| text.chars().count());
    let chunks = split_oversized("ab cd enormousword ef gh", &counter, 5).unwrap();

    // "ab cd" counts 4 (fragments are summed, joins are free)
    assert_eq!(chunks, vec!["ab cd", "enormousword", "ef gh"]);
}

#[test]
fn test_huge_counts_do_not_overflow_budget() {
    let counter = FnCounter::new("big", |_: &str| usize::MAX / 2 + 1);
    let chunks = chunk_text("A. B.", &counter, usize::MAX).unwrap();

    // Two halves of usize::MAX exceed it, so they cannot share a chunk
    assert_eq!(chunks, vec!["A.", "B."]);
}

#[test]
fn test_chunks_joined_with_single_spaces() {
    let chunks = chunk_text("First.\n\n   Second!\tThird?", &WordCounter, 512).unwrap();
    assert_eq!(chunks, vec!["First. Second! Third?"]);
}

// ========================================================================
// Properties
// ========================================================================

#[test]
fn test_order_and_content_preserved() {
    let text = sample_document();
    for max_tokens in 1..=25 {
        let chunks = chunk_text(&text, &WordCounter, max_tokens).unwrap();
        let rejoined = chunks.join(" ");
        assert_eq!(
            words(&rejoined),
            words(&text),
            "content changed at max_tokens={}",
            max_tokens
        );
    }
}

#[test]
fn test_budget_bound_holds() {
    let text = sample_document();
    for max_tokens in 1..=25 {
        let chunks = chunk_text(&text, &WordCounter, max_tokens).unwrap();
        for chunk in &chunks {
            let tokens = WordCounter.count_tokens(chunk).unwrap();
            let single_word = words(chunk).len() == 1;
            assert!(
                tokens <= max_tokens || single_word,
                "chunk {:?} has {} tokens, budget {}",
                chunk,
                tokens,
                max_tokens
            );
        }
    }
}

#[test]
fn test_budget_bound_with_char_counter() {
    let counter = FnCounter::new("chars", |text: &str| text.chars().count());
    let text = sample_document();
    for max_tokens in [8, 20, 64, 200] {
        let chunks = chunk_text(&text, &counter, max_tokens).unwrap();
        for chunk in &chunks {
            // Joining spaces are not counted by the packer
            let counted: usize = words(chunk).iter().map(|w| w.chars().count()).sum();
            assert!(counted <= max_tokens || words(chunk).len() == 1);
        }
    }
}

#[test]
fn test_no_empty_chunks() {
    let text = sample_document();
    for max_tokens in 1..=25 {
        let chunks = chunk_text(&text, &WordCounter, max_tokens).unwrap();
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }
}

#[test]
fn test_rechunking_is_deterministic() {
    let text = sample_document();
    let first = chunk_text(&text, &WordCounter, 7).unwrap();
    let second = chunk_text(&text, &WordCounter, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_smaller_budget_never_reduces_chunk_count() {
    let text = sample_document();
    let counts: Vec<usize> = (1..=30)
        .map(|max_tokens| chunk_text(&text, &WordCounter, max_tokens).unwrap().len())
        .collect();

    for pair in counts.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "chunk count grew with a larger budget: {:?}",
            counts
        );
    }
}

// ========================================================================
// Tokenizer interaction
// ========================================================================

#[test]
fn test_tokenizer_failure_is_propagated() {
    let result = chunk_text("Fine sentence. A poison sentence.", &FailingCounter, 512);
    assert!(matches!(
        result,
        Err(ChunkError::Tokenizer(TokenizerError::Encoding(_)))
    ));
}

#[test]
fn test_tokenizer_failure_inside_overflow_split() {
    // Sentence-level count succeeds for the first sentence, then the
    // oversized one fails while counting its words
    struct FailOnWord;
    impl TokenCounter for FailOnWord {
        fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
            if text == "boom" {
                return Err(TokenizerError::Encoding("boom".to_string()));
            }
            Ok(text.split_whitespace().count())
        }
        fn name(&self) -> &str {
            "fail-on-word"
        }
    }

    let result = chunk_text("Ok here. one two boom four five.", &FailOnWord, 3);
    assert!(matches!(result, Err(ChunkError::Tokenizer(_))));
}

#[test]
fn test_one_count_per_sentence() {
    let counter = CountingCounter::default();
    chunk_text("One. Two two. Three three three.", &counter, 512).unwrap();
    assert_eq!(counter.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_oversized_sentence_counts_each_word() {
    let counter = CountingCounter::default();
    chunk_text("Fits. a b c d e.", &counter, 3).unwrap();
    // 2 sentence counts + 5 word counts
    assert_eq!(counter.calls.load(Ordering::SeqCst), 7);
}

// ========================================================================
// Generic packer
// ========================================================================

#[test]
fn test_pack_by_budget_custom_items() {
    let items = vec![
        "aa".to_string(),
        "bbb".to_string(),
        "   ".to_string(),
        "cccccccc".to_string(),
        "d".to_string(),
    ];

    let chunks = pack_by_budget(
        items,
        5,
        |item: &String| Ok(item.len()),
        |item: String| Ok(vec![format!("<{}>", item)]),
    )
    .unwrap();

    assert_eq!(chunks, vec!["aa bbb", "<cccccccc>", "d"]);
}

#[test]
fn test_pack_by_budget_empty() {
    let items: Vec<&str> = Vec::new();
    let chunks = pack_by_budget(items, 5, |_| Ok(1), |_| Ok(vec![])).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn test_pack_sentences_directly() {
    let chunks = pack(vec!["One two.", "Three."], &WordCounter, 2).unwrap();
    assert_eq!(chunks, vec!["One two.", "Three."]);
}

// ========================================================================
// Chunker
// ========================================================================

#[test]
fn test_chunker_default_segmenter() {
    let chunker = Chunker::new(&ChunkerConfig::new(4), Arc::new(WordCounter)).unwrap();
    assert_eq!(chunker.max_tokens(), 4);
    assert_eq!(chunker.segmenter_name(), "sentence");
    assert_eq!(chunker.counter().name(), "words");

    let chunks = chunker.chunk("One two three. Four five six.").unwrap();
    assert_eq!(chunks, vec!["One two three.", "Four five six."]);
}

#[test]
fn test_chunker_matches_chunk_text() {
    let text = sample_document();
    let chunker = Chunker::new(&ChunkerConfig::new(9), Arc::new(WordCounter)).unwrap();
    assert_eq!(
        chunker.chunk(&text).unwrap(),
        chunk_text(&text, &WordCounter, 9).unwrap()
    );
}

#[test]
fn test_chunker_with_line_segmenter() {
    let chunker = Chunker::new(&ChunkerConfig::new(3), Arc::new(WordCounter))
        .unwrap()
        .with_segmenter(Box::new(LineSegmenter));

    let chunks = chunker.chunk("alpha beta\ngamma\n\ndelta epsilon zeta").unwrap();
    assert_eq!(chunks, vec!["alpha beta gamma", "delta epsilon zeta"]);
}

#[test]
fn test_chunker_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Chunker>();
}
