//! Analyze token artifacts and print per-file reports.

use std::path::PathBuf;

use clap::Args;
use rayon::prelude::*;

use pstream_metrics::FileAnalysis;
use pstream_output::{OutputFormat, OutputFormatter};
use pstream_tokens::read_tokens;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Token artifact files (JSON Lines, one token per line)
    #[arg(required = true, value_name = "ARTIFACT")]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output as JSON Lines
    #[arg(long)]
    pub jsonl: bool,
}

/// Analyze every artifact. A malformed artifact is logged and skipped;
/// the command only fails when no artifact could be analyzed at all.
pub fn run(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let format = OutputFormat::from_cli(args.json, args.jsonl);

    let reports: Vec<FileAnalysis> = args
        .files
        .par_iter()
        .filter_map(|path| {
            let file = path.display().to_string();
            match read_tokens(path) {
                Ok(tokens) => Some(pstream_metrics::analyze(&file, &tokens)),
                Err(err) => {
                    tracing::warn!(file, %err, "skipping malformed token artifact");
                    None
                }
            }
        })
        .collect();

    for report in &reports {
        report.print(&format);
    }

    if reports.is_empty() {
        anyhow::bail!("no artifact could be analyzed");
    }
    Ok(())
}
