use super::*;

// ========================================================================
// PunctuationSegmenter Tests
// ========================================================================

#[test]
fn test_sentence_splitting() {
    let sentences = PunctuationSegmenter.segment("First sentence. Second sentence! Third sentence?");
    assert_eq!(
        sentences,
        vec!["First sentence.", "Second sentence!", "Third sentence?"]
    );
}

#[test]
fn test_trailing_text_without_punctuation() {
    let sentences = PunctuationSegmenter.segment("Hello world. no terminal mark here");
    assert_eq!(sentences, vec!["Hello world.", "no terminal mark here"]);
}

#[test]
fn test_empty_and_blank_text() {
    assert!(PunctuationSegmenter.segment("").is_empty());
    assert!(PunctuationSegmenter.segment("   \n\t  ").is_empty());
}

#[test]
fn test_sentences_are_trimmed() {
    let sentences = PunctuationSegmenter.segment("  Leading space.   \n\n  Next line.  ");
    assert_eq!(sentences, vec!["Leading space.", "Next line."]);
}

#[test]
fn test_punctuation_without_whitespace_does_not_split() {
    // "3.14" and "e.g.," have no whitespace right after the mark
    let sentences = PunctuationSegmenter.segment("Pi is 3.14 roughly. Done.");
    assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "Done."]);
}

#[test]
fn test_abbreviation_over_splits() {
    // Known imprecision: "Dr." ends a sentence
    let sentences = PunctuationSegmenter.segment("Dr. Smith went to the store. He bought milk.");
    assert_eq!(
        sentences,
        vec!["Dr.", "Smith went to the store.", "He bought milk."]
    );
}

#[test]
fn test_repeated_marks_stay_together() {
    let sentences = PunctuationSegmenter.segment("Wait... What?! Fine.");
    assert_eq!(sentences, vec!["Wait...", "What?!", "Fine."]);
}

#[test]
fn test_newlines_count_as_whitespace() {
    let sentences = PunctuationSegmenter.segment("Line one.\nLine two.\r\n\r\nLine three");
    assert_eq!(sentences, vec!["Line one.", "Line two.", "Line three"]);
}

#[test]
fn test_unicode_text() {
    let sentences = PunctuationSegmenter.segment("Café au lait. Über alles! 世界");
    assert_eq!(sentences, vec!["Café au lait.", "Über alles!", "世界"]);
}

#[test]
fn test_segments_borrow_from_input() {
    let text = String::from("One. Two.");
    let sentences = PunctuationSegmenter.segment(&text);
    let base = text.as_ptr() as usize;
    for sentence in sentences {
        let offset = sentence.as_ptr() as usize - base;
        assert_eq!(&text[offset..offset + sentence.len()], sentence);
    }
}

// ========================================================================
// LineSegmenter Tests
// ========================================================================

#[test]
fn test_line_segmenter() {
    let lines = LineSegmenter.segment("first line\n\n  second line  \r\nthird. still third");
    assert_eq!(lines, vec!["first line", "second line", "third. still third"]);
}

#[test]
fn test_line_segmenter_empty() {
    assert!(LineSegmenter.segment("\n\n").is_empty());
}

// ========================================================================
// SegmenterKind Tests
// ========================================================================

#[test]
fn test_segmenter_kind_from_str() {
    assert_eq!("sentence".parse::<SegmenterKind>().unwrap(), SegmenterKind::Sentence);
    assert_eq!("Lines".parse::<SegmenterKind>().unwrap(), SegmenterKind::Line);
    assert!("paragraph".parse::<SegmenterKind>().is_err());
}

#[test]
fn test_segmenter_kind_build() {
    assert_eq!(SegmenterKind::default().build().name(), "sentence");
    assert_eq!(SegmenterKind::Line.build().name(), "line");
}
