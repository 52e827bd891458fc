//! Error types raised by the tableau engine.
//!
//! Per the engine's contract, satisfiability (including unsatisfiability and
//! an empty final tableau) is never an error. Only programmer errors — a
//! malformed coalition, a corrupted node index — and the optional resource
//! cap surface as [`TableauError`].

use std::fmt;

/// The only error kinds the engine may raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableauError {
    /// A coalition was empty, a formula was structurally malformed, or a
    /// stored node's key did not match its contents. These indicate bugs in
    /// the caller or the engine itself; callers should not attempt recovery.
    InvariantViolation(String),

    /// The optional defensive cap on states/prestates/edges (off by
    /// default) was exceeded.
    InternalLimit(String),
}

impl fmt::Display for TableauError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableauError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            TableauError::InternalLimit(msg) => write!(f, "internal limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for TableauError {}

pub type Result<T> = std::result::Result<T, TableauError>;
