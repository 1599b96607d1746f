//! Analyze command - run one classification.

use anyhow::Result;
use clap::Args;
use std::io::{IsTerminal, Read};
use tracing::debug;

use sentiq_fetch::FetchError;
use sentiq_store::StoreError;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the analyze command.
#[derive(Args, Default)]
pub struct AnalyzeArgs {
    /// Text to analyze. Read from stdin when omitted.
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// Runs the analyze command.
pub async fn run(args: &AnalyzeArgs, cli: &Cli) -> Result<()> {
    let text = gather_text(args)?;

    let controller = super::build_controller().await?;

    let outcome = controller.resolve().await;
    if outcome.connection.is_none() {
        let status = controller.status().await;
        if !cli.quiet {
            let formatter = TextFormatter::new(!cli.no_color);
            eprintln!("{}", formatter.format_status(&status, None));
        }
        std::process::exit(ExitCode::NoEndpoint as i32);
    }

    match controller.analyze(&text).await {
        Ok(Some(record)) => {
            let connection = controller.connection().await;
            match cli.format {
                OutputFormat::Json => {
                    let formatter = JsonFormatter::new(cli.pretty);
                    println!("{}", formatter.render(&record)?);
                }
                OutputFormat::Text => {
                    let formatter = TextFormatter::new(!cli.no_color);
                    println!("{}", formatter.format_record(&record, connection.as_ref()));
                }
            }
            Ok(())
        }
        Ok(None) => {
            // Empty input is ignored, not reported.
            debug!("Nothing to analyze");
            Ok(())
        }
        Err(StoreError::Fetch(FetchError::NoEndpointAvailable)) => {
            std::process::exit(ExitCode::NoEndpoint as i32);
        }
        Err(e) => Err(e.into()),
    }
}

/// Joins argument words, or falls back to piped stdin.
fn gather_text(args: &AnalyzeArgs) -> Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        // Interactive invocation with no text; the controller treats the
        // empty string as a no-op.
        return Ok(String::new());
    }

    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}
