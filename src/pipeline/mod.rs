mod discover;
mod error;

pub use discover::discover_documents;
pub use error::PipelineError;

use crate::chunker::Chunker;
use crate::config::BatchConfig;
use crate::report::{count_chunks, ChunkStats, TokenRange};
use crate::writer::{
    output_path, qualified_output_path, write_chunks, ChunkManifest, ManifestContext, OutputFormat,
};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A chunked document held in memory
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub path: PathBuf,
    pub text: String,
    pub chunks: Vec<String>,
    /// Token count per chunk, parallel to `chunks`
    pub counts: Vec<usize>,
    pub stats: ChunkStats,
}

/// Result for one document in a batch
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: Result<WrittenDocument, PipelineError>,
}

/// A processed document and where its chunks were written
#[derive(Debug)]
pub struct WrittenDocument {
    pub document: ProcessedDocument,
    pub output: PathBuf,
}

/// Per-document outcomes of a batch run, in discovery order
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<DocumentOutcome>,
    pub output_dir: PathBuf,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    pub fn documents(&self) -> impl Iterator<Item = &WrittenDocument> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &PipelineError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }
}

/// Read a document as text. Invalid UTF-8 is replaced rather than rejected.
fn read_text(path: &Path) -> Result<String, PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "invalid UTF-8, replacing undecodable bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Chunk one document and compute its statistics.
///
/// A document with no text after trimming is an error here, unlike the
/// core chunker which returns an empty sequence.
pub fn process_document(
    path: &Path,
    chunker: &Chunker,
    ranges: &[TokenRange],
) -> Result<ProcessedDocument, PipelineError> {
    let text = read_text(path)?;
    if text.trim().is_empty() {
        return Err(PipelineError::NoText(path.to_path_buf()));
    }
    debug!(path = %path.display(), chars = text.chars().count(), "read document");

    let chunks = chunker.chunk(&text)?;
    let counts = count_chunks(&chunks, chunker.counter())?;
    let stats = ChunkStats::from_counts(&counts, ranges);

    Ok(ProcessedDocument {
        path: path.to_path_buf(),
        text,
        chunks,
        counts,
        stats,
    })
}

/// Write a processed document to `output_dir` in the requested format
pub fn write_document(
    document: &ProcessedDocument,
    chunker: &Chunker,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, PipelineError> {
    let path = output_path(output_dir, &document.path, format);
    write_document_to(document, chunker, &path, format)?;
    Ok(path)
}

fn write_document_to(
    document: &ProcessedDocument,
    chunker: &Chunker,
    path: &Path,
    format: OutputFormat,
) -> Result<(), PipelineError> {
    let written = match format {
        OutputFormat::Text => write_chunks(&document.chunks, &path),
        OutputFormat::Json => ChunkManifest::new(
            &document.path,
            &document.text,
            &document.chunks,
            &document.counts,
            &document.stats,
            ManifestContext {
                max_tokens: chunker.max_tokens(),
                tokenizer: chunker.counter().name(),
                segmenter: chunker.segmenter_name(),
            },
        )
        .write_to_file(path),
    };

    written.map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Assign every document its own output path.
///
/// Documents keep `<stem>_chunks.<ext>` unless another document maps to the
/// same name, in which case both use [`qualified_output_path`]. A path that is
/// still taken is a conflict for the later document.
fn plan_outputs(
    documents: &[PathBuf],
    config: &BatchConfig,
) -> Vec<Result<PathBuf, PipelineError>> {
    let plain: Vec<PathBuf> = documents
        .iter()
        .map(|path| output_path(&config.output_dir, path, config.format))
        .collect();

    let mut uses: HashMap<&Path, usize> = HashMap::new();
    for path in &plain {
        *uses.entry(path.as_path()).or_default() += 1;
    }

    let mut claimed = HashSet::new();
    documents
        .iter()
        .zip(&plain)
        .map(|(source, plain)| {
            let planned = if uses[plain.as_path()] > 1 {
                let relative = source
                    .strip_prefix(&config.input_dir)
                    .ok()
                    .filter(|r| r.file_name().is_some())
                    .unwrap_or_else(|| Path::new(source.file_name().unwrap_or_default()));
                qualified_output_path(&config.output_dir, relative, config.format)
            } else {
                plain.clone()
            };

            if claimed.insert(planned.clone()) {
                Ok(planned)
            } else {
                Err(PipelineError::OutputConflict(planned))
            }
        })
        .collect()
}

/// Chunk every discovered document and write the results.
///
/// Documents are processed in parallel; each one is chunked sequentially.
/// A failing document is logged and recorded, never aborting the batch.
pub fn run_batch(
    config: &BatchConfig,
    chunker: &Chunker,
    ranges: &[TokenRange],
) -> Result<BatchSummary, PipelineError> {
    let documents = discover_documents(config)?;
    info!(
        count = documents.len(),
        max_tokens = chunker.max_tokens(),
        "processing documents"
    );

    let planned = plan_outputs(&documents, config);

    let outcomes: Vec<DocumentOutcome> = documents
        .par_iter()
        .zip(planned)
        .map(|(path, output)| {
            let result = output.and_then(|output| {
                let document = process_document(path, chunker, ranges)?;
                write_document_to(&document, chunker, &output, config.format)?;
                Ok(WrittenDocument { document, output })
            });

            match &result {
                Ok(written) => info!(
                    path = %path.display(),
                    chunks = written.document.chunks.len(),
                    output = %written.output.display(),
                    "document chunked"
                ),
                Err(e) => warn!(path = %path.display(), error = %e, "document failed"),
            }

            DocumentOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect();

    Ok(BatchSummary {
        outcomes,
        output_dir: config.output_dir.clone(),
    })
}
