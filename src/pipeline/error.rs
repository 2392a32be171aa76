use crate::chunker::ChunkError;
use crate::tokenizer::TokenizerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No text in {}", .0.display())]
    NoText(PathBuf),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error("Output {} already claimed by another document", .0.display())]
    OutputConflict(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
