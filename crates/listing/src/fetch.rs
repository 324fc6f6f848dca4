//! Async fetch seams the controller is parameterized by.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::query::ListQuery;
use crate::result::ListResult;

/// Fetch one page of a collection.
#[async_trait]
pub trait ListFetcher<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<T>, FetchError>;
}

/// Fetch the full record behind one row, for expansion.
#[async_trait]
pub trait DetailFetcher<K, D>: Send + Sync {
    async fn fetch_detail(&self, key: &K) -> Result<D, FetchError>;
}

/// What a mutation endpoint answered with.
///
/// The platform's mutation endpoints are inconsistent: some return the
/// updated record, some the full updated collection. A non-array response
/// is one row to merge; an array means the whole list must be refetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MutationOutcome<T> {
    Replaced(Vec<T>),
    Updated(T),
}
