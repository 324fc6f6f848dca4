//! End-to-end access flow: raw token → session → gate decision.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{TimeZone, Utc};

use expodesk_auth::{
    Access, AccessGate, PermissionSet, ScopeCheck, ScopeCheckError, Session,
};
use expodesk_core::{ExpoId, RoutePath};

struct NeverCalledScope;

#[async_trait]
impl ScopeCheck for NeverCalledScope {
    async fn owns_expo(&self, expo_id: ExpoId) -> Result<bool, ScopeCheckError> {
        panic!("scope check must not run for member sessions, got {}", expo_id);
    }
}

fn member_token(expo_ids: &[i64]) -> String {
    let payload = serde_json::json!({
        "loginType": "EXPO_ADMIN_MEMBER",
        "expoIds": expo_ids,
        "iat": 1_700_000_000,
        "exp": 1_700_003_600,
    });
    format!(
        "h.{}.s",
        URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes())
    )
}

#[tokio::test]
async fn member_out_of_scope_is_denied_end_to_end() {
    expodesk_observability::init();

    let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
    let session = Session::from_token(&member_token(&[10, 20]), now).unwrap();

    let gate = AccessGate::with_defaults();
    let path = RoutePath::parse("/expos/30/admin/booths").unwrap();

    let access = gate
        .evaluate(
            &path,
            Some(&session),
            Some(&PermissionSet::all_granted()),
            &NeverCalledScope,
        )
        .await;

    assert_eq!(access, Access::Deny);
}

#[tokio::test]
async fn member_in_scope_reaches_their_tables() {
    let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
    let session = Session::from_token(&member_token(&[10, 20]), now).unwrap();

    let gate = AccessGate::with_defaults();
    let path = RoutePath::parse("/expos/20/admin/reservations").unwrap();

    let mut permissions = PermissionSet::none_granted();
    permissions.reserver_list_view = true;

    let access = gate
        .evaluate(&path, Some(&session), Some(&permissions), &NeverCalledScope)
        .await;

    assert_eq!(access, Access::Allow);
}

#[tokio::test]
async fn expired_member_token_never_becomes_a_session() {
    let now = Utc.timestamp_opt(1_800_000_000, 0).unwrap();
    assert!(Session::from_token(&member_token(&[10]), now).is_err());
}
