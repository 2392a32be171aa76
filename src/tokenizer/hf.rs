use super::{TokenCounter, TokenizerError};
use std::path::Path;
use tokenizers::tokenizer::Tokenizer;

/// Subword tokenizer loaded from a HuggingFace `tokenizer.json`
///
/// Counts ids without special tokens, so `[CLS]`/`[SEP]` never eat into the
/// chunk budget. Truncation and padding from the file are disabled; a count
/// must reflect the whole input.
pub struct HfTokenizer {
    inner: Tokenizer,
    name: String,
}

impl HfTokenizer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        let path = path.as_ref();
        let load_err = |reason: String| TokenizerError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };

        let mut inner = Tokenizer::from_file(path).map_err(|e| load_err(e.to_string()))?;
        inner
            .with_truncation(None)
            .map_err(|e| load_err(format!("Failed to disable truncation: {}", e)))?;
        inner.with_padding(None);

        let name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|n| format!("hf:{}", n))
            .unwrap_or_else(|| "hf".to_string());

        Ok(Self { inner, name })
    }
}

impl TokenCounter for HfTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Encoding(e.to_string()))?;
        Ok(encoding.get_ids().len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
