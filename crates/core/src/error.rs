//! Shared client-core error model.

use thiserror::Error;

/// Result type used across the pure client-core crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic, non-transport failure.
///
/// Network and server failures live in the edge crates; this enum covers
/// failures that can be decided from the inputs alone.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A route path could not be parsed into a known family.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// Authorization failure at a client-core boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_route(msg: impl Into<String>) -> Self {
        Self::InvalidRoute(msg.into())
    }
}
