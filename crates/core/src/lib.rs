//! `expodesk-core` — client-core foundation building blocks.
//!
//! This crate contains **pure** primitives (no IO, no transport concerns):
//! strongly-typed identifiers, the shared error model, and route-path
//! normalization.

pub mod error;
pub mod form;
pub mod id;
pub mod route;

pub use error::{DomainError, DomainResult};
pub use form::FieldErrors;
pub use id::{ExpoId, RequestId};
pub use route::{RouteArea, RoutePath};
