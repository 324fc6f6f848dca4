//! The API client: bearer auth, JSON plumbing, and the scope probe.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use expodesk_auth::{ScopeCheck, ScopeCheckError};
use expodesk_core::{ExpoId, RequestId};
use expodesk_listing::MutationOutcome;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Thin wrapper over `reqwest::Client` bound to one API base URL and,
/// optionally, one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            token: None,
        })
    }

    /// Attach the session bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let request_id = RequestId::new();
        let url = self.endpoint(path);
        tracing::debug!(%request_id, %url, "GET");

        let response = self
            .authorized(self.http.get(&url).query(query))
            .send()
            .await?;
        Self::decode_json(path, response).await
    }

    /// GET and report only the status code (no body decode).
    pub async fn get_status(&self, path: &str) -> Result<u16, ApiError> {
        let request_id = RequestId::new();
        let url = self.endpoint(path);
        tracing::debug!(%request_id, %url, "GET (status only)");

        let response = self.authorized(self.http.get(&url)).send().await?;
        Ok(response.status().as_u16())
    }

    /// Submit a mutation carrying a JSON body.
    ///
    /// The decoded outcome distinguishes the two response patterns the
    /// platform's mutation endpoints exhibit (single record vs. full
    /// collection).
    pub async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<MutationOutcome<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let request_id = RequestId::new();
        let url = self.endpoint(path);
        tracing::debug!(%request_id, %url, method = %method, "mutation");

        let response = self
            .authorized(self.http.request(method, &url).json(body))
            .send()
            .await?;
        Self::decode_json(path, response).await
    }

    /// Submit a body-less mutation (typically DELETE).
    pub async fn send_empty<T>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<MutationOutcome<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let request_id = RequestId::new();
        let url = self.endpoint(path);
        tracing::debug!(%request_id, %url, method = %method, "mutation");

        let response = self
            .authorized(self.http.request(method, &url))
            .send()
            .await?;
        Self::decode_json(path, response).await
    }

    pub(crate) async fn send_raw(&self, path: &str) -> Result<Response, ApiError> {
        let request_id = RequestId::new();
        let url = self.endpoint(path);
        tracing::debug!(%request_id, %url, "GET (raw)");

        Ok(self.authorized(self.http.get(&url)).send().await?)
    }

    async fn decode_json<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(path, e.to_string()))
    }
}

/// Expo ownership probe backed by the admin access endpoint.
///
/// Admin-code sessions have no static scope list; the gate asks the
/// server instead. A definitive "not yours"/"not there" answer maps to
/// `false`; anything the probe cannot interpret is an error (which the
/// gate fails closed on).
pub struct ExpoScopeProbe {
    client: Arc<ApiClient>,
}

impl ExpoScopeProbe {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScopeCheck for ExpoScopeProbe {
    async fn owns_expo(&self, expo_id: ExpoId) -> Result<bool, ScopeCheckError> {
        let path = format!("expos/{}/admin/access", expo_id);
        match self.client.get_status(&path).await {
            Ok(status) if (200..300).contains(&status) => Ok(true),
            Ok(401) | Ok(403) | Ok(404) => Ok(false),
            Ok(status) => Err(ScopeCheckError(format!("unexpected status {}", status))),
            Err(e) => Err(ScopeCheckError(e.to_string())),
        }
    }
}
