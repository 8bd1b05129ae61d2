//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors produced by a single research provider adapter.
///
/// Any of these causes the orchestrator to fall through to the next tier;
/// they are never retried within the same tier.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with a non-success status (auth, quota, 5xx).
    #[error("provider returned {code}: {body}")]
    Status { code: u16, body: String },

    /// Provider answered 2xx but the body did not match its schema.
    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No API key configured for this provider.
    #[error("missing credentials for provider")]
    MissingCredentials,
}

/// Errors for research operations above the adapter layer.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// A provider call failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for provider adapters.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
