// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Sentiq CLI - sentiment analysis from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Analyze a piece of text
//! sentiq analyze "great product"
//!
//! # Analyze from stdin
//! echo "great product" | sentiq
//!
//! # Probe both endpoints
//! sentiq check
//!
//! # Connectivity status
//! sentiq status
//!
//! # Show the analysis history
//! sentiq history --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{analyze, check, history, status};

// ============================================================================
// CLI Definition
// ============================================================================

/// Sentiq CLI - sentiment analysis against a resilient backend pair.
#[derive(Parser)]
#[command(name = "sentiq")]
#[command(about = "Sentiment analysis CLI")]
#[command(long_about = r#"
Sentiq classifies text against a remote sentiment service.

Two backends are configured (primary and fallback); the client probes them
in priority order, upgrades to https when possible, and fails over once per
request. Endpoints can be overridden with SENTIQ_PRIMARY_URL and
SENTIQ_FALLBACK_URL.

Examples:
  sentiq analyze "great product"   # One analysis
  echo "text" | sentiq             # Analyze stdin
  sentiq check                     # Probe both endpoints
  sentiq history --format json     # History for charting
"#)]
#[command(version)]
#[command(author = "Sentiq Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'analyze' on stdin by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the sentiment of a piece of text (default).
    #[command(visible_alias = "a")]
    Analyze(analyze::AnalyzeArgs),

    /// Probe both endpoints and show reachability.
    #[command(visible_alias = "c")]
    Check,

    /// Show connectivity status after a resolution pass.
    #[command(visible_alias = "s")]
    Status,

    /// Show the analysis history.
    #[command(visible_alias = "hist")]
    History,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No endpoint reachable.
    NoEndpoint = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("sentiq=debug,info")
    } else {
        EnvFilter::new("sentiq=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Analyze(args)) => analyze::run(args, &cli).await,
        Some(Commands::Check) => check::run(&cli).await,
        Some(Commands::Status) => status::run(&cli).await,
        Some(Commands::History) => history::run(&cli).await,
        None => {
            // Default to analyzing stdin
            analyze::run(&analyze::AnalyzeArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
