use crate::chunker::{validate_max_tokens, ChunkError, DEFAULT_MAX_TOKENS};
use crate::segmenter::SegmenterKind;
use crate::writer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Budget for a single chunking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    pub max_tokens: usize,
}

impl ChunkerConfig {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn validate(&self) -> Result<(), ChunkError> {
        validate_max_tokens(self.max_tokens)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

/// Settings for a batch run over a directory of documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned for documents
    pub input_dir: PathBuf,
    /// Directory receiving one output file per document
    pub output_dir: PathBuf,
    /// Lowercase extensions (without dot) to pick up
    pub extensions: Vec<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    pub format: OutputFormat,
    /// Number of chunks previewed per document in the console report
    pub preview: usize,
    /// Tokenizer spec: `words`, `chars` or `hf:<path>`
    pub tokenizer: String,
    pub segmenter: SegmenterKind,
    pub chunker: ChunkerConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("documents/knowledge"),
            output_dir: PathBuf::from("outputs"),
            extensions: vec!["txt".to_string(), "md".to_string()],
            recursive: false,
            format: OutputFormat::Text,
            preview: 2,
            tokenizer: "chars".to_string(),
            segmenter: SegmenterKind::Sentence,
            chunker: ChunkerConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Whether `path` carries one of the configured extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
