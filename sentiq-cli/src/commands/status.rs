//! Status command - resolve and report the connectivity status.

use anyhow::Result;

use crate::output::{JsonFormatter, StatusReport, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the status command.
pub async fn run(cli: &Cli) -> Result<()> {
    let controller = super::build_controller().await?;
    controller.resolve().await;

    let status = controller.status().await;
    let connection = controller.connection().await;

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let report = StatusReport {
                status: &status,
                connection: connection.as_ref(),
            };
            println!("{}", formatter.render(&report)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_status(&status, connection.as_ref()));
        }
    }

    Ok(())
}
