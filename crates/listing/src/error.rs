//! Fetch error surface for list and detail queries.

use thiserror::Error;

/// Failure of one list or detail fetch.
///
/// Kept `Clone`/`Eq` so it can live inside controller state (list-level
/// error vs. per-row detail error) and be asserted on in tests. Transport
/// crates map their native errors into these variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server rejected the request with status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The page envelope violated its own invariants.
    #[error("malformed page envelope: {0}")]
    Envelope(String),
}
