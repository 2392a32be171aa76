mod counters;
mod error;
#[cfg(feature = "hf-tokenizer")]
mod hf;


pub use counters::{CharEstimateCounter, FnCounter, WordCounter};
pub use error::TokenizerError;
#[cfg(feature = "hf-tokenizer")]
pub use hf::HfTokenizer;

use std::sync::Arc;

/// Token counting capability consumed by the chunker
///
/// Implementations must be deterministic for identical input. The chunker
/// only ever asks for counts, never for token ids.
pub trait TokenCounter: Send + Sync {
    /// Count the tokens in `text`
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError>;

    /// Short name used in logs and manifests
    fn name(&self) -> &str;
}

impl<T: TokenCounter + ?Sized> TokenCounter for &T {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        (**self).count_tokens(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TokenCounter + ?Sized> TokenCounter for Arc<T> {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        (**self).count_tokens(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Tokenizer selection for the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Whitespace-separated words
    Words,
    /// Byte-length estimate (~4 bytes per token)
    Chars,
    /// HuggingFace `tokenizer.json` at the given path
    HuggingFace(String),
}

impl TokenizerKind {
    /// Parse `words`, `chars` or `hf:<path>`
    pub fn parse(spec: &str) -> Result<Self, TokenizerError> {
        match spec.trim() {
            "words" | "word" => Ok(Self::Words),
            "chars" | "char-estimate" => Ok(Self::Chars),
            other => match other.strip_prefix("hf:") {
                Some(path) if !path.is_empty() => Ok(Self::HuggingFace(path.to_string())),
                _ => Err(TokenizerError::UnknownKind(other.to_string())),
            },
        }
    }

    /// Build the counter this kind describes
    pub fn build(&self) -> Result<Arc<dyn TokenCounter>, TokenizerError> {
        match self {
            Self::Words => Ok(Arc::new(WordCounter)),
            Self::Chars => Ok(Arc::new(CharEstimateCounter)),
            #[cfg(feature = "hf-tokenizer")]
            Self::HuggingFace(path) => Ok(Arc::new(HfTokenizer::from_file(path)?)),
            #[cfg(not(feature = "hf-tokenizer"))]
            Self::HuggingFace(path) => Err(TokenizerError::Unsupported(format!(
                "hf:{} (rebuild with --features hf-tokenizer)",
                path
            ))),
        }
    }
}

impl std::str::FromStr for TokenizerKind {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
