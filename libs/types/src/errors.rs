//! Request-error taxonomy for the query surface
//!
//! Only caller-contract violations surface as errors. Per-venue pricing
//! failures (no liquidity, numerical non-convergence) are absorbed locally
//! into zero quotes so one faulty venue never poisons an aggregate query.

use thiserror::Error;

/// Errors raised for malformed requests at the query facade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Token path must name at least two tokens
    #[error("token path must contain at least 2 tokens, got {0}")]
    EmptyPath(usize),

    /// Per-hop arrays must match the hop count of the path
    #[error("{what} length {actual} does not match hop count {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Parts must be at least 1
    #[error("parts must be at least 1")]
    ZeroParts,

    /// Input and output token must differ
    #[error("input and output token are the same")]
    SameToken,

    /// Address failed hex decoding or had the wrong length
    #[error("invalid token address: '{0}'")]
    InvalidAddress(String),
}
