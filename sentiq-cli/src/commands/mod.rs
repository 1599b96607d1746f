//! CLI command implementations.

pub mod analyze;
pub mod check;
pub mod history;
pub mod status;

use anyhow::Result;
use sentiq_store::{Config, Controller};

/// Loads configuration and builds a controller over the HTTP transport.
pub async fn build_controller() -> Result<Controller> {
    let config = Config::load()?.with_env_overrides();
    let controller = Controller::with_http(config).await?;
    Ok(controller)
}
