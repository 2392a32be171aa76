use super::{push_trimmed, Segmenter};

/// Treats every non-blank line as one unit
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmenter;

impl Segmenter for LineSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut lines = Vec::new();
        for line in text.lines() {
            push_trimmed(&mut lines, line);
        }
        lines
    }

    fn name(&self) -> &'static str {
        "line"
    }
}
