//! ProofForge CLI - evaluate repositories and inspect the stored history.
//!
//! ## Commands
//!
//! - `evaluate`: score a repository summary, anchor the trace digest, and
//!   persist the record
//! - `results`: print the stored history for one repository
//! - `results-all`: print the whole stored history
//!
//! Configuration comes from `PROOFFORGE_*` environment variables (ledger
//! endpoint/token, topic id, store path, retry knobs).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proofforge_core::RepositorySummary;
use proofforge_pipeline::{EvaluationPipeline, PipelineConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "proofforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explainable repository evaluation with proof anchoring", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a repository summary and persist the record
    Evaluate {
        /// Repository owner
        owner: String,

        /// Repository name
        name: String,

        /// Stargazer count
        #[arg(long)]
        stars: u64,

        /// Open issue count
        #[arg(long)]
        open_issues: u64,

        /// Whether the repository has a tests directory
        #[arg(long)]
        has_tests: bool,

        /// Commit count on the default branch
        #[arg(long)]
        commits: u64,

        /// Primary language, if known
        #[arg(long)]
        language: Option<String>,

        /// Repository size in kilobytes, if known
        #[arg(long)]
        size_kb: Option<u64>,
    },

    /// Print the stored evaluation history for one repository
    Results {
        /// Repository owner
        owner: String,

        /// Repository name
        name: String,
    },

    /// Print the whole stored evaluation history
    ResultsAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = PipelineConfig::from_env();
    let pipeline = EvaluationPipeline::from_config(&config)
        .await
        .context("failed to wire evaluation pipeline")?;

    match cli.command {
        Commands::Evaluate {
            owner,
            name,
            stars,
            open_issues,
            has_tests,
            commits,
            language,
            size_kb,
        } => {
            let summary = RepositorySummary {
                owner,
                name,
                star_count: stars,
                open_issue_count: open_issues,
                has_tests,
                commit_count: commits,
                language,
                size_kb,
                description: None,
            };

            let report = pipeline.evaluate(summary).await?;
            println!("{}", serde_json::to_string_pretty(&report.record)?);
            if !report.record.is_anchored() {
                tracing::warn!("proof was not anchored: {:?}", report.submission);
            }
        }

        Commands::Results { owner, name } => {
            let records = pipeline.list_by_repository(&owner, &name).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::ResultsAll => {
            let records = pipeline.list_all().await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
