use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use docchunk::pipeline::{process_document, run_batch};
use docchunk::report::{self, ranges_for_budget, DocumentReport};
use docchunk::{
    format_chunks, BatchConfig, Chunker, ChunkerConfig, OutputFormat, SegmenterKind,
    TokenizerKind,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Token-aware sentence chunking for embedding pipelines
#[derive(Parser, Debug)]
#[command(name = "docchunk", version, about)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chunk every document in a directory and write one output file each
    Batch(BatchArgs),
    /// Chunk a single file and print the chunks to stdout
    File(FileArgs),
}

#[derive(Args, Debug)]
struct ChunkingArgs {
    /// Maximum tokens per chunk
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Token counter: words, chars, or hf:<path/to/tokenizer.json>
    #[arg(long)]
    tokenizer: Option<String>,

    /// Segmentation strategy: sentence or line
    #[arg(long)]
    segmenter: Option<SegmenterKind>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing documents
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory receiving chunk files
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Chunks previewed per document
    #[arg(long)]
    preview: Option<usize>,

    /// Descend into subdirectories
    #[arg(long)]
    recursive: bool,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Document to chunk
    path: PathBuf,

    /// Print statistics after the chunks
    #[arg(long)]
    stats: bool,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Apply command-line overrides on top of file/default settings
fn apply_chunking_args(config: &mut BatchConfig, args: &ChunkingArgs) {
    if let Some(max_tokens) = args.max_tokens {
        config.chunker = ChunkerConfig::new(max_tokens);
    }
    if let Some(tokenizer) = &args.tokenizer {
        config.tokenizer = tokenizer.clone();
    }
    if let Some(segmenter) = args.segmenter {
        config.segmenter = segmenter;
    }
}

fn build_chunker(config: &BatchConfig) -> Result<Chunker> {
    let counter = TokenizerKind::parse(&config.tokenizer)
        .and_then(|kind| kind.build())
        .context("Failed to initialize tokenizer")?;
    info!(tokenizer = counter.name(), "tokenizer initialized");

    let chunker = Chunker::new(&config.chunker, counter)
        .context("Invalid chunker configuration")?
        .with_segmenter(config.segmenter.build());

    Ok(chunker)
}

fn run_batch_command(args: BatchArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::from_file(path)?,
        None => BatchConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(preview) = args.preview {
        config.preview = preview;
    }
    config.recursive |= args.recursive;
    apply_chunking_args(&mut config, &args.chunking);
    debug!(?config, "batch configuration");

    let start = Instant::now();
    let chunker = build_chunker(&config)?;
    let ranges = ranges_for_budget(chunker.max_tokens(), report::DEFAULT_RANGES.len());

    let summary = run_batch(&config, &chunker, &ranges)
        .with_context(|| format!("Failed to process {}", config.input_dir.display()))?;

    if summary.outcomes.is_empty() {
        bail!(
            "No supported documents found in '{}' (extensions: {})",
            config.input_dir.display(),
            config.extensions.join(", ")
        );
    }

    for written in summary.documents() {
        let document = &written.document;
        let name = document
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        print!(
            "{}",
            DocumentReport {
                name: &name,
                chunks: &document.chunks,
                counts: &document.counts,
                stats: &document.stats,
                preview: config.preview,
            }
        );
        println!("\n[OK] Chunks saved to: {}", written.output.display());
    }

    print!("{}", summary);
    info!(
        processed = summary.processed(),
        failed = summary.failed(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch complete"
    );

    Ok(())
}

fn run_file_command(args: FileArgs) -> Result<()> {
    let mut config = BatchConfig::default();
    apply_chunking_args(&mut config, &args.chunking);

    let chunker = build_chunker(&config)?;
    let ranges = ranges_for_budget(chunker.max_tokens(), report::DEFAULT_RANGES.len());

    let document = process_document(&args.path, &chunker, &ranges)
        .with_context(|| format!("Failed to chunk {}", args.path.display()))?;

    print!("{}", format_chunks(&document.chunks));
    if args.stats {
        print!("{}", document.stats);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Batch(args) => run_batch_command(args),
        Commands::File(args) => run_file_command(args),
    }
}
