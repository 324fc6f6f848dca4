//! Session token claims (transport-agnostic).
//!
//! The client never verifies token signatures; that is the server's job.
//! What it does is read the payload of the bearer token it was issued, the
//! same way a browser client decodes a JWT to learn its role claim. The
//! decode here is therefore unverified: nothing security-sensitive may be
//! derived from it beyond UI gating, and every privileged action is
//! re-checked server-side.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use expodesk_core::ExpoId;

/// The role claim carried by a session token.
///
/// Upstream tokens use the `loginType` key; older tokens used `role`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginType {
    User,
    ExpoAdminCode,
    ExpoAdminMember,
    PlatformAdmin,
}

/// Decoded payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "loginType", alias = "role")]
    pub login_type: LoginType,

    /// The one expo an admin-code identity is bound to.
    #[serde(rename = "expoId", default, skip_serializing_if = "Option::is_none")]
    pub expo_id: Option<ExpoId>,

    /// Expos a member admin may administer.
    #[serde(rename = "expoIds", default, skip_serializing_if = "Vec::is_empty")]
    pub expo_ids: Vec<ExpoId>,

    /// Issued-at timestamp.
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("token payload is not valid JSON: {0}")]
    Payload(String),

    #[error("token is missing the '{0}' claim")]
    MissingClaim(&'static str),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Decode the payload of a compact JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))
}

/// Deterministically validate the claim time window.
///
/// - No IO
/// - No panics
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn encode_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.sig", header, body)
    }

    fn claims(issued: i64, expires: i64) -> TokenClaims {
        TokenClaims {
            login_type: LoginType::User,
            expo_id: None,
            expo_ids: Vec::new(),
            issued_at: Utc.timestamp_opt(issued, 0).unwrap(),
            expires_at: Utc.timestamp_opt(expires, 0).unwrap(),
        }
    }

    #[test]
    fn decodes_member_token_payload() {
        let token = encode_token(&serde_json::json!({
            "loginType": "EXPO_ADMIN_MEMBER",
            "expoIds": [10, 20],
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.login_type, LoginType::ExpoAdminMember);
        assert_eq!(claims.expo_ids, vec![ExpoId::new(10), ExpoId::new(20)]);
    }

    #[test]
    fn accepts_legacy_role_key() {
        let token = encode_token(&serde_json::json!({
            "role": "PLATFORM_ADMIN",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.login_type, LoginType::PlatformAdmin);
    }

    #[test]
    fn rejects_token_without_three_parts() {
        assert_eq!(decode_claims("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Malformed));
    }

    #[test]
    fn rejects_non_json_payload() {
        let body = URL_SAFE_NO_PAD.encode(b"plain text");
        let token = format!("h.{}.s", body);
        assert!(matches!(
            decode_claims(&token),
            Err(TokenError::Payload(_))
        ));
    }

    #[test]
    fn validate_accepts_token_inside_window() {
        let c = claims(100, 200);
        let now = Utc.timestamp_opt(150, 0).unwrap();
        assert!(validate_claims(&c, now).is_ok());
    }

    #[test]
    fn validate_rejects_expired_token() {
        let c = claims(100, 200);
        let now = Utc.timestamp_opt(200, 0).unwrap();
        assert_eq!(validate_claims(&c, now), Err(TokenError::Expired));
    }

    #[test]
    fn validate_rejects_future_token() {
        let c = claims(100, 200);
        let now = Utc.timestamp_opt(50, 0).unwrap();
        assert_eq!(validate_claims(&c, now), Err(TokenError::NotYetValid));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let c = claims(200, 100);
        let now = Utc.timestamp_opt(150, 0).unwrap();
        assert_eq!(validate_claims(&c, now), Err(TokenError::InvalidTimeWindow));
    }
}
