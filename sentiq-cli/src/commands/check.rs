//! Check command - probe both endpoints and report reachability.

use anyhow::Result;

use crate::output::{JsonFormatter, ProbeReport, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the check command.
pub async fn run(cli: &Cli) -> Result<()> {
    let controller = super::build_controller().await?;
    let outcome = controller.resolve().await;
    let connection = controller.connection().await;

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let report = ProbeReport {
                resolved: outcome.is_resolved(),
                mixed_content_blocked: outcome.mixed_content_blocked(),
                connection: connection.as_ref(),
                probes: &outcome.probes,
            };
            println!("{}", formatter.render(&report)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_probes(&outcome.probes));
            if let Some(connection) = &connection {
                println!(
                    "Using: {} ({})",
                    connection.endpoint.role.label(),
                    connection.base_url()
                );
            }
            if outcome.mixed_content_blocked() && !cli.quiet {
                eprintln!(
                    "Note: an endpoint answers only over plain http, which the secure page \
                     context blocks."
                );
            }
        }
    }

    if !outcome.is_resolved() {
        std::process::exit(ExitCode::NoEndpoint as i32);
    }

    Ok(())
}
