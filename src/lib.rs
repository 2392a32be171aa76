// Public API exports
pub mod chunker;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod segmenter;
pub mod tokenizer;
pub mod writer;

// Re-export main types for convenience
pub use chunker::{
    chunk_text, pack, pack_by_budget, split_oversized, ChunkError, Chunker, DEFAULT_MAX_TOKENS,
};

pub use config::{BatchConfig, ChunkerConfig, ConfigError};

pub use segmenter::{LineSegmenter, PunctuationSegmenter, Segmenter, SegmenterKind};

pub use tokenizer::{
    CharEstimateCounter, FnCounter, TokenCounter, TokenizerError, TokenizerKind, WordCounter,
};

pub use report::{ChunkStats, HistogramBucket, TokenRange, DEFAULT_RANGES};

pub use writer::{format_chunks, write_chunks, ChunkManifest, OutputFormat};

pub use pipeline::{
    discover_documents, process_document, run_batch, BatchSummary, PipelineError,
    ProcessedDocument,
};
