use super::ChunkStats;
use crate::pipeline::BatchSummary;
use std::fmt;

const RULE_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 150;

fn banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f, "\n{}", rule)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", rule)
}

/// Console report for one document: a preview of the first `preview`
/// chunks followed by the summary statistics
pub struct DocumentReport<'a> {
    pub name: &'a str,
    pub chunks: &'a [String],
    pub counts: &'a [usize],
    pub stats: &'a ChunkStats,
    pub preview: usize,
}

impl fmt::Display for DocumentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, &format!("CHUNK ANALYSIS: {}", self.name))?;

        let previewed = self.chunks.iter().zip(self.counts).take(self.preview);
        for (i, (chunk, tokens)) in previewed.enumerate() {
            let head: String = chunk.chars().take(PREVIEW_CHARS).collect();
            writeln!(f, "\n--- Chunk {} ---", i)?;
            writeln!(f, "Tokens: {}", tokens)?;
            writeln!(f, "Characters: {}", chunk.chars().count())?;
            writeln!(f, "Preview: {}...", head)?;
        }

        write!(f, "{}", self.stats)
    }
}

/// Summary block with the token distribution
impl fmt::Display for ChunkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "SUMMARY STATISTICS")?;
        writeln!(f, "Total chunks: {}", self.total_chunks)?;
        writeln!(f, "Total tokens: {}", self.total_tokens)?;

        if self.total_chunks == 0 {
            return Ok(());
        }

        writeln!(f, "Average tokens per chunk: {:.1}", self.average_tokens)?;
        writeln!(f, "Min tokens: {}", self.min_tokens)?;
        writeln!(f, "Max tokens: {}", self.max_tokens)?;

        writeln!(f, "\nToken distribution:")?;
        for bucket in &self.histogram {
            writeln!(
                f,
                "  {}-{} tokens: {} chunks",
                bucket.start, bucket.end, bucket.count
            )?;
        }
        if self.unbucketed > 0 {
            writeln!(f, "  outside ranges: {} chunks", self.unbucketed)?;
        }

        Ok(())
    }
}

/// Closing block for a batch run
impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "PROCESSING COMPLETE")?;
        writeln!(f, "[+] Successfully processed: {} file(s)", self.processed())?;
        if self.failed() > 0 {
            writeln!(f, "[-] Failed: {} file(s)", self.failed())?;
            for (path, error) in self.failures() {
                writeln!(f, "    {}: {}", path.display(), error)?;
            }
        }
        writeln!(f, "\n[+] Output location: {}", self.output_dir.display())
    }
}
