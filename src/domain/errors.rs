//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Nothing here is fatal: every failure is recoverable by re-issuing the
//! operation that triggered it (re-apply the filter, reselect the day, retry
//! the mutation).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The log store errored while serving a query (network/store fault).
    QueryFailed(String),
    /// The order authority declined an order-status change, with its reason.
    MutationRejected(String),
    /// Transport or unexpected fault while performing a mutation.
    MutationFailed(String),
    /// Referenced log entry is not part of the current projection.
    NotFound,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::QueryFailed(msg) => write!(f, "Log store query failed: {}", msg),
            DomainError::MutationRejected(msg) => write!(f, "Mutation rejected: {}", msg),
            DomainError::MutationFailed(msg) => write!(f, "Mutation failed: {}", msg),
            DomainError::NotFound => write!(f, "Log entry not found"),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from reqwest errors (used in the infrastructure layer). Query
// and mutation paths both travel over the same client, so the caller picks
// the variant; this default covers the query side.
impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::QueryFailed(e.to_string())
    }
}
