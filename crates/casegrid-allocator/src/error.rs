//! Allocator error types.

use thiserror::Error;

/// Errors that fail an allocation round outright.
///
/// Per-pair scoring problems are not errors at this level; they are
/// collected in [`crate::Allocation::score_failures`].
#[derive(Debug, Error)]
pub enum AllocError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("capacity ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("allocation round aborted: {0}")]
    RoundAborted(String),
}

/// Errors raised by the capacity ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("agent not tracked by ledger: {0}")]
    UnknownAgent(String),

    #[error("agent {agent_id} is at capacity ({limit})")]
    AtCapacity { agent_id: String, limit: u32 },
}

/// Error returned by a scorer for a single pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("scorer failed: {0}")]
    Failed(String),

    #[error("score is not a finite number: {0}")]
    NonFinite(f64),

    #[error("score {score} outside [{min}, {max}]")]
    OutOfRange { score: f64, min: f64, max: f64 },
}

pub type AllocResult<T> = Result<T, AllocError>;
