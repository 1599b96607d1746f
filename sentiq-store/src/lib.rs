// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sentiq Store
//!
//! State management for the Sentiq client.
//!
//! This crate provides:
//!
//! - **Controller**: the API-access controller owning the active connection,
//!   the status machine, and the history log
//! - **StatusReporter**: the observable connectivity state machine
//! - **HistoryStore**: append-only log of completed analyses
//! - **Config**: endpoint configuration with env overrides
//! - **Persistence**: file I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use sentiq_store::{Config, Controller};
//!
//! let config = Config::load()?.with_env_overrides();
//! let controller = Controller::with_http(config).await?;
//!
//! controller.resolve().await;
//! if let Some(record) = controller.analyze("great product").await? {
//!     println!("{}", record.sentiment);
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod persistence;
pub mod status;

pub use config::Config;
pub use controller::Controller;
pub use error::StoreError;
pub use history::HistoryStore;
pub use persistence::{
    default_config_dir, default_config_path, default_history_path, load_json,
    load_json_or_default, save_json,
};
pub use status::StatusReporter;
