//! CLI command implementations - one command per file.

pub mod analyze;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pstream")]
#[command(about = "Derive code-quality metrics from PowerShell token streams")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more token artifact files
    Analyze(analyze::AnalyzeArgs),

    /// Print the JSON schema of the per-file analysis report
    Schema,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args),
        Commands::Schema => {
            pstream_output::print_output_schema::<pstream_metrics::FileAnalysis>();
            Ok(())
        }
    }
}
