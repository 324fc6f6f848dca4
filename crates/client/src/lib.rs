//! `expodesk-client` — HTTP transport for the client core.
//!
//! Implements the fetch seams the pure crates declare: collection and
//! detail fetchers over the platform REST API, the expo ownership probe
//! for the access gate, lazy permission loading, export download, and
//! bearer-token persistence.

pub mod collections;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod permissions;
pub mod token_store;

pub use collections::{Collection, CollectionBinding, DetailBinding};
pub use config::ApiConfig;
pub use download::Download;
pub use error::ApiError;
pub use http::{ApiClient, ExpoScopeProbe};
pub use permissions::PermissionLoader;
pub use token_store::TokenStore;
