//! History command - show past analyses.
//!
//! Reads the durable log directly; no network I/O.

use anyhow::Result;

use sentiq_store::{Config, HistoryStore};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the history command.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load()?.with_env_overrides();
    let history = HistoryStore::load(&config.history_path()).await;

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.render(&history.all())?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_history(history.all()));
        }
    }

    Ok(())
}
