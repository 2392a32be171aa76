use super::PipelineError;
use crate::config::BatchConfig;
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Collect documents under `config.input_dir` with an accepted extension,
/// sorted by path. Hidden files and directories are skipped.
pub fn discover_documents(config: &BatchConfig) -> Result<Vec<PathBuf>, PipelineError> {
    let root = &config.input_dir;
    if !root.is_dir() {
        return Err(PipelineError::MissingInput(root.clone()));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        if config.accepts(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    debug!(
        dir = %root.display(),
        count = documents.len(),
        "discovered documents"
    );

    Ok(documents)
}
