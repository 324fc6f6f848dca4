//! Lazy, once-per-session permission loading.

use std::sync::Arc;

use tokio::sync::Mutex;

use expodesk_auth::PermissionSet;

use crate::error::ApiError;
use crate::http::ApiClient;

const PERMISSIONS_PATH: &str = "admin/permissions/me";

/// Fetches the session's capability record once and caches it.
///
/// `current()` answers `None` until the first successful resolution;
/// callers must treat that as "pending", never as all-false. There is a
/// single loader per session context, so there is no concurrent-writer
/// hazard; the lock only serializes duplicate lazy initializations.
pub struct PermissionLoader {
    client: Arc<ApiClient>,
    cached: Mutex<Option<PermissionSet>>,
}

impl PermissionLoader {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cached: Mutex::new(None),
        }
    }

    /// The cached record, without triggering a fetch.
    pub async fn current(&self) -> Option<PermissionSet> {
        *self.cached.lock().await
    }

    /// The capability record, fetching it on first use.
    pub async fn resolve(&self) -> Result<PermissionSet, ApiError> {
        let mut guard = self.cached.lock().await;
        if let Some(cached) = *guard {
            return Ok(cached);
        }

        let fetched: PermissionSet = self.client.get_json(PERMISSIONS_PATH, &[]).await?;
        *guard = Some(fetched);
        tracing::debug!(?fetched, "permission record resolved");
        Ok(fetched)
    }

    /// Drop the cache (logout, scope switch). The next `resolve` refetches.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
