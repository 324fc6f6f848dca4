//! The access gate evaluated before rendering protected content.

use async_trait::async_trait;
use thiserror::Error;

use expodesk_core::{ExpoId, RouteArea, RoutePath};

use crate::permissions::PermissionSet;
use crate::rules::RouteRules;
use crate::session::Session;

/// Three-valued gate result.
///
/// `Pending` lets the caller render a loading state distinctly from a
/// denial; it must re-invoke the gate once the permission record resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
    Pending,
}

/// Error raised by an injected scope check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("scope check failed: {0}")]
pub struct ScopeCheckError(pub String);

/// External existence/ownership probe for one expo.
///
/// Admin-code sessions have no static scope list, so the gate asks the
/// server whether the session's expo binding actually covers the target.
#[async_trait]
pub trait ScopeCheck: Send + Sync {
    async fn owns_expo(&self, expo_id: ExpoId) -> Result<bool, ScopeCheckError>;
}

/// Route-level access decisions for the current session.
///
/// Pure function of (session, permission record, path), except for the one
/// injected `ScopeCheck` call admin-code sessions require.
#[derive(Debug, Clone)]
pub struct AccessGate {
    rules: RouteRules,
}

impl AccessGate {
    pub fn new(rules: RouteRules) -> Self {
        Self { rules }
    }

    /// A gate with the default expo-admin rule table.
    pub fn with_defaults() -> Self {
        Self::new(RouteRules::expo_admin_defaults())
    }

    /// Decide whether `session` may view `path`.
    ///
    /// `session` is `None` when the token is missing or undecodable;
    /// `permissions` is `None` while the permission record is still being
    /// fetched. Any `ScopeCheck` failure is a denial (fail-closed), never
    /// `Pending`.
    pub async fn evaluate(
        &self,
        path: &RoutePath,
        session: Option<&Session>,
        permissions: Option<&PermissionSet>,
        scope_check: &dyn ScopeCheck,
    ) -> Access {
        let Some(session) = session else {
            return Access::Deny;
        };

        // Evaluation must not proceed on unresolved permissions, whatever
        // the role or path.
        let Some(permissions) = permissions else {
            return Access::Pending;
        };

        match path.area() {
            RouteArea::Public => Access::Allow,

            RouteArea::PlatformAdmin => {
                if matches!(session, Session::PlatformAdmin) {
                    Access::Allow
                } else {
                    Access::Deny
                }
            }

            RouteArea::ExpoAdmin => {
                self.evaluate_expo_admin(path, session, permissions, scope_check)
                    .await
            }
        }
    }

    async fn evaluate_expo_admin(
        &self,
        path: &RoutePath,
        session: &Session,
        permissions: &PermissionSet,
        scope_check: &dyn ScopeCheck,
    ) -> Access {
        match session {
            Session::PlatformAdmin => Access::Allow,

            Session::AdminCode { .. } => {
                let Some(target) = path.expo_id() else {
                    return Access::Deny;
                };
                match scope_check.owns_expo(target).await {
                    // Admin-code identities bypass the capability record:
                    // once the ownership probe passes they are fully
                    // privileged within that one expo.
                    Ok(true) => Access::Allow,
                    Ok(false) => Access::Deny,
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "scope check failed, denying");
                        Access::Deny
                    }
                }
            }

            Session::Member { expo_scope_ids } => {
                // Scope first; an out-of-scope target is denied without
                // ever touching the external probe.
                match path.expo_id() {
                    Some(target) if expo_scope_ids.contains(&target) => {
                        self.capability_decision(path, permissions)
                    }
                    _ => Access::Deny,
                }
            }

            Session::Guest | Session::User => Access::Deny,
        }
    }

    fn capability_decision(&self, path: &RoutePath, permissions: &PermissionSet) -> Access {
        let suffix = path.admin_suffix().unwrap_or("");
        match self.rules.required_for(suffix) {
            Some(required) if permissions.allows(required) => Access::Allow,
            Some(_) => Access::Deny,
            // No matching rule: open by default (upstream parity).
            None => Access::Allow,
        }
    }
}
