//! Bindings from admin tables to their collection endpoints.

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use expodesk_listing::{DetailFetcher, FetchError, ListFetcher, ListQuery, ListResult, MutationOutcome};

use crate::error::ApiError;
use crate::http::ApiClient;

/// The admin collections the platform exposes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collection {
    Reservations,
    Payments,
    Emails,
    Tickets,
    Booths,
    Events,
    Banners,
    Members,
    Settlements,
}

impl Collection {
    pub fn as_path(&self) -> &'static str {
        match self {
            Collection::Reservations => "reservations",
            Collection::Payments => "payments",
            Collection::Emails => "emails",
            Collection::Tickets => "tickets",
            Collection::Booths => "booths",
            Collection::Events => "events",
            Collection::Banners => "banners",
            Collection::Members => "members",
            Collection::Settlements => "settlements",
        }
    }
}

/// One table's list endpoint, usable as the controller's list fetcher.
pub struct CollectionBinding<T> {
    client: Arc<ApiClient>,
    collection: Collection,
    _rows: PhantomData<fn() -> T>,
}

impl<T> CollectionBinding<T> {
    pub fn new(client: Arc<ApiClient>, collection: Collection) -> Self {
        Self {
            client,
            collection,
            _rows: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }
}

impl<T: DeserializeOwned + Send + Sync + 'static> CollectionBinding<T> {
    /// POST a new record.
    pub async fn create<B>(&self, body: &B) -> Result<MutationOutcome<T>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.client
            .send_json(Method::POST, self.collection.as_path(), body)
            .await
    }

    /// PUT an update for one record.
    pub async fn update<B>(&self, id: impl Display, body: &B) -> Result<MutationOutcome<T>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let path = format!("{}/{}", self.collection.as_path(), id);
        self.client.send_json(Method::PUT, &path, body).await
    }

    /// DELETE one record.
    pub async fn delete(&self, id: impl Display) -> Result<MutationOutcome<T>, ApiError> {
        let path = format!("{}/{}", self.collection.as_path(), id);
        self.client.send_empty(Method::DELETE, &path).await
    }
}

#[async_trait]
impl<T> ListFetcher<T> for CollectionBinding<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<T>, FetchError> {
        self.client
            .get_json(self.collection.as_path(), &query.to_params())
            .await
            .map_err(FetchError::from)
    }
}

/// One table's detail endpoint, usable as the controller's detail fetcher.
pub struct DetailBinding<K, D> {
    client: Arc<ApiClient>,
    collection: Collection,
    _marker: PhantomData<fn(K) -> D>,
}

impl<K, D> DetailBinding<K, D> {
    pub fn new(client: Arc<ApiClient>, collection: Collection) -> Self {
        Self {
            client,
            collection,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<K, D> DetailFetcher<K, D> for DetailBinding<K, D>
where
    K: Display + Send + Sync,
    D: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_detail(&self, key: &K) -> Result<D, FetchError> {
        let path = format!("{}/{}", self.collection.as_path(), key);
        self.client
            .get_json(&path, &[])
            .await
            .map_err(FetchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_paths_are_stable() {
        assert_eq!(Collection::Reservations.as_path(), "reservations");
        assert_eq!(Collection::Settlements.as_path(), "settlements");
    }
}
