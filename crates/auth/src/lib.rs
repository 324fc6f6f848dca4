//! `expodesk-auth` — pure session/permission boundary for the client core.
//!
//! This crate is intentionally decoupled from HTTP and storage: tokens are
//! decoded and validated here, but fetched elsewhere. The one external call
//! (`ScopeCheck`) is injected.

pub mod claims;
pub mod gate;
pub mod permissions;
pub mod rules;
pub mod session;

pub use claims::{LoginType, TokenClaims, TokenError, decode_claims, validate_claims};
pub use gate::{Access, AccessGate, ScopeCheck, ScopeCheckError};
pub use permissions::{Capability, PermissionSet};
pub use rules::{RouteRule, RouteRules};
pub use session::Session;
