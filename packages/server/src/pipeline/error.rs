//! User-visible failure taxonomy.
//!
//! Internal stage failures degrade and never surface; only the pre-flight
//! gate, duplicate detection, cancellation, and the hard wall-clock
//! ceiling can produce one of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The subscription gate rejected the request before any paid work.
    /// Terminal and non-retryable; carries the upgrade call-to-action.
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        upgrade_url: String,
        benefits: Vec<String>,
    },

    /// The gate itself failed. The only path to a 500.
    #[error("quota gate failed: {0}")]
    GateFailure(#[source] anyhow::Error),

    /// An identical request is already in flight.
    #[error("an identical generation request is already running")]
    DuplicateRequest,

    /// Caller aborted. Not a user-visible error; work just stops.
    #[error("generation cancelled by caller")]
    Cancelled,

    /// The whole pipeline exceeded its wall-clock ceiling. Distinct from
    /// any internal degradation, which never fails the request.
    #[error("generation timed out")]
    Timeout,
}
