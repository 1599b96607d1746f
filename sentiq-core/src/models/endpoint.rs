//! Endpoint and connection types.
//!
//! This module contains the types describing candidate backends and the
//! connection the dispatcher currently trusts:
//! - [`Endpoint`] - One candidate backend
//! - [`EndpointRole`] - Priority of a candidate
//! - [`Scheme`] - Transport scheme
//! - [`ActiveConnection`] - The endpoint+scheme pair selected by resolution
//! - [`ProbeResult`] - Outcome of one health-check attempt

use serde::{Deserialize, Serialize};

// ============================================================================
// Scheme
// ============================================================================

/// Transport scheme for reaching an endpoint.
///
/// Resolution tries `https` before `http`; whichever succeeds is locked into
/// the [`ActiveConnection`] and never re-derived per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// TLS transport, probed first.
    Https,
    /// Plaintext transport, probed only after `https` fails.
    Http,
}

impl Scheme {
    /// Returns the URL scheme string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }

    /// Rewrites the scheme of a base URL to this scheme.
    ///
    /// A base URL without a scheme prefix is treated as scheme-less and
    /// prefixed directly.
    pub fn rewrite(&self, base_url: &str) -> String {
        let rest = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .unwrap_or(base_url);
        format!("{}://{rest}", self.as_str())
    }

    /// Returns the scheme embedded in a base URL.
    ///
    /// Defaults to `https` when the URL carries no recognizable prefix.
    pub fn embedded_in(base_url: &str) -> Self {
        if base_url.starts_with("http://") {
            Self::Http
        } else {
            Self::Https
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Endpoint Role
// ============================================================================

/// Priority of a candidate backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    /// Tried first; failures here fall back one hop.
    Primary,
    /// Tried only after the primary; failures here are terminal.
    Fallback,
}

impl EndpointRole {
    /// Returns a human-readable label, as shown in the endpoint indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Primary API",
            Self::Fallback => "Fallback API",
        }
    }
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// One candidate backend.
///
/// Immutable once constructed; two are configured at process start and
/// neither is destroyed during the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Base URL of the backend, scheme included.
    pub base_url: String,
    /// Priority of this candidate.
    pub role: EndpointRole,
}

impl Endpoint {
    /// Creates the primary endpoint.
    pub fn primary(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            role: EndpointRole::Primary,
        }
    }

    /// Creates the fallback endpoint.
    pub fn fallback(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            role: EndpointRole::Fallback,
        }
    }

    /// Returns the scheme embedded in this endpoint's base URL.
    pub fn embedded_scheme(&self) -> Scheme {
        Scheme::embedded_in(&self.base_url)
    }
}

// ============================================================================
// Active Connection
// ============================================================================

/// The single endpoint+scheme pair currently trusted for dispatch.
///
/// Owned exclusively by the controller; replaced wholesale on re-resolution
/// or mid-session failover. At most one exists at a time. The scheme is
/// locked at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConnection {
    /// The endpoint this connection designates.
    pub endpoint: Endpoint,
    /// The scheme the endpoint answered under.
    pub scheme: Scheme,
}

impl ActiveConnection {
    /// Creates a connection from a probed endpoint and its reachable scheme.
    pub fn new(endpoint: Endpoint, scheme: Scheme) -> Self {
        Self { endpoint, scheme }
    }

    /// Returns the base URL rewritten under the locked scheme.
    pub fn base_url(&self) -> String {
        self.scheme.rewrite(&self.endpoint.base_url)
    }

    /// Returns the role of the connected endpoint.
    pub fn role(&self) -> EndpointRole {
        self.endpoint.role
    }
}

// ============================================================================
// Probe Result
// ============================================================================

/// Outcome of one health-check attempt against a candidate.
///
/// Created per probe attempt for reporting; not retained beyond resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The candidate that was probed.
    pub endpoint: Endpoint,
    /// The scheme the candidate answered under, if any.
    pub reachable_scheme: Option<Scheme>,
    /// How long the attempt took.
    pub latency_ms: u64,
    /// Failure description when unreachable.
    pub error: Option<String>,
    /// True when the attempt was blocked by the secure page context rather
    /// than failing on the network.
    #[serde(default)]
    pub mixed_content: bool,
}

impl ProbeResult {
    /// Returns true if the candidate answered under some scheme.
    pub fn is_reachable(&self) -> bool {
        self.reachable_scheme.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
