use crate::report::ChunkStats;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SEPARATOR_WIDTH: usize = 60;

/// On-disk layout for a document's chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Separator line, `CHUNK <index>` header, separator line, chunk text
    #[default]
    Text,
    /// [`ChunkManifest`] as pretty JSON
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Render chunks in the separator/header text layout
pub fn format_chunks<S: AsRef<str>>(chunks: &[S]) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    for (i, chunk) in chunks.iter().enumerate() {
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&format!("CHUNK {}\n", i));
        out.push_str(&separator);
        out.push('\n');
        out.push_str(chunk.as_ref());
        out.push_str("\n\n");
    }

    out
}

/// `<output_dir>/<source stem>_chunks.<ext>`
pub fn output_path(output_dir: &Path, source: &Path, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    output_dir.join(format!("{}_chunks.{}", stem, format.extension()))
}

/// `<output_dir>/<relative parent>/<file name>_chunks.<ext>`
///
/// Keeps the source extension and subdirectory, for documents whose stems
/// collide.
pub fn qualified_output_path(
    output_dir: &Path,
    relative: &Path,
    format: OutputFormat,
) -> PathBuf {
    let name = relative
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let dir = match relative.parent() {
        Some(parent) => output_dir.join(parent),
        None => output_dir.to_path_buf(),
    };

    dir.join(format!("{}_chunks.{}", name, format.extension()))
}

/// Write `contents` to `path`, creating parent directories first
fn write_with_parents(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)
}

/// Write chunks in the text layout
pub fn write_chunks<S: AsRef<str>>(chunks: &[S], path: &Path) -> io::Result<()> {
    write_with_parents(path, &format_chunks(chunks))
}

/// Hex SHA-256 of the source text
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// One chunk as recorded in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub index: usize,
    pub text: String,
    pub token_count: usize,
    pub char_count: usize,
}

/// Machine-readable description of one chunked document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkManifest {
    pub source: String,
    pub source_sha256: String,
    pub created_at: String,
    pub generator: String,
    pub max_tokens: usize,
    pub tokenizer: String,
    pub segmenter: String,
    pub stats: ChunkStats,
    pub chunks: Vec<ChunkRecord>,
}

/// Chunking parameters recorded alongside the output
#[derive(Debug, Clone, Copy)]
pub struct ManifestContext<'a> {
    pub max_tokens: usize,
    pub tokenizer: &'a str,
    pub segmenter: &'a str,
}

impl ChunkManifest {
    pub fn new(
        source: &Path,
        text: &str,
        chunks: &[String],
        counts: &[usize],
        stats: &ChunkStats,
        context: ManifestContext<'_>,
    ) -> Self {
        let chunks = chunks
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(index, (chunk, &token_count))| ChunkRecord {
                index,
                text: chunk.clone(),
                token_count,
                char_count: chunk.chars().count(),
            })
            .collect();

        Self {
            source: source.display().to_string(),
            source_sha256: hash_text(text),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("docchunk v{}", env!("CARGO_PKG_VERSION")),
            max_tokens: context.max_tokens,
            tokenizer: context.tokenizer.to_string(),
            segmenter: context.segmenter.to_string(),
            stats: stats.clone(),
            chunks,
        }
    }

    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        write_with_parents(path, &json)
    }
}
