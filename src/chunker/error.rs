use crate::tokenizer::TokenizerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Token counting failed: {0}")]
    Tokenizer(#[from] TokenizerError),
}
