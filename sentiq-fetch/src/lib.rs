// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sentiq Fetch
//!
//! Endpoint resolution and request dispatch for the Sentiq client.
//!
//! This crate holds the network-facing half of the API-access controller:
//!
//! - [`transport::ApiTransport`] - the seam over the wire (probe + predict)
//! - [`client::HttpClient`] - the reqwest-backed transport
//! - [`resolver::EndpointResolver`] - probes candidates in priority order,
//!   `https` before `http`, and selects the active connection
//! - [`dispatcher::RequestDispatcher`] - issues the classification request
//!   with exactly one fallback hop and signals sticky-failover promotion
//!
//! ## Example
//!
//! ```ignore
//! use sentiq_fetch::{EndpointResolver, HttpClient, RequestDispatcher};
//!
//! let transport = Arc::new(HttpClient::new()?);
//! let resolver = EndpointResolver::new(transport.clone());
//! let outcome = resolver.resolve(&[primary, fallback]).await;
//!
//! let dispatcher = RequestDispatcher::new(transport);
//! let dispatched = dispatcher
//!     .dispatch("great product", outcome.connection.as_ref(), &fallback)
//!     .await?;
//! ```

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod resolver;
pub mod transport;
pub mod urls;
pub mod wire;

// Re-export key types at crate root
pub use client::HttpClient;
pub use dispatcher::{Dispatched, RequestDispatcher};
pub use error::FetchError;
pub use resolver::{EndpointResolver, ResolveOutcome};
pub use transport::{ApiTransport, PredictReply, ProbeReply};
pub use wire::{ErrorBody, PredictRequest, PredictResponse};
