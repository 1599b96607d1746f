// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sentiq Core
//!
//! Core types and models for the Sentiq client.
//!
//! This crate provides the foundational types used across all other
//! Sentiq crates:
//!
//! - Endpoint and connection models (which backend to talk to, and how)
//! - Analysis records (the results the UI charts)
//! - Connectivity status types (the observable state machine)
//! - Error types
//!
//! ## Key Types
//!
//! ### Endpoint Types
//! - [`Endpoint`] - One candidate backend (base URL + role)
//! - [`EndpointRole`] - Primary or fallback priority
//! - [`Scheme`] - Transport scheme, locked at resolution time
//! - [`ActiveConnection`] - The single endpoint+scheme pair trusted for dispatch
//! - [`ProbeResult`] - Outcome of one health-check attempt
//!
//! ### Analysis Types
//! - [`AnalysisRecord`] - One completed classification
//!
//! ### Status Types
//! - [`ApiStatus`] - Coarse connectivity status
//! - [`StatusSnapshot`] - Status plus message and transition time
//! - [`StatusEvent`] - Structured transition event for observers
//! - [`StatusCause`] - What drove a transition

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Endpoint types
    ActiveConnection,
    Endpoint,
    EndpointRole,
    ProbeResult,
    Scheme,
    // Analysis types
    AnalysisRecord,
    // Status types
    ApiStatus,
    StatusCause,
    StatusEvent,
    StatusSnapshot,
};
