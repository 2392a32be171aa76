use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Failed to load tokenizer from {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to encode text: {0}")]
    Encoding(String),

    #[error("Unknown tokenizer: {0}")]
    UnknownKind(String),

    #[error("Tokenizer support not compiled in: {0}")]
    Unsupported(String),
}
