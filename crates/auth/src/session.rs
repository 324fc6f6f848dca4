//! Session variants derived from token claims.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use expodesk_core::ExpoId;

use crate::claims::{self, LoginType, TokenClaims, TokenError};

/// The authenticated identity behind the current navigation.
///
/// Modeled as a tagged union so callers match on the variant instead of
/// sniffing claim fields. `Guest` exists for completeness (no token at
/// all); most gate callers pass `None` instead when the token is missing
/// or undecodable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No authenticated identity.
    Guest,

    /// An ordinary consumer account.
    User,

    /// An identity authenticated via a shared admin code, bound to one expo.
    ///
    /// Admin-code identities carry no static scope list; ownership of the
    /// target expo is resolved through an external existence check.
    AdminCode { expo_id: ExpoId },

    /// A member-type expo admin with an explicit scope list.
    Member { expo_scope_ids: BTreeSet<ExpoId> },

    /// A platform operator.
    PlatformAdmin,
}

impl Session {
    /// Derive a session from already-validated claims.
    pub fn from_claims(claims: &TokenClaims) -> Result<Self, TokenError> {
        match claims.login_type {
            LoginType::User => Ok(Session::User),
            LoginType::PlatformAdmin => Ok(Session::PlatformAdmin),
            LoginType::ExpoAdminCode => {
                let expo_id = claims.expo_id.ok_or(TokenError::MissingClaim("expoId"))?;
                Ok(Session::AdminCode { expo_id })
            }
            LoginType::ExpoAdminMember => Ok(Session::Member {
                expo_scope_ids: claims.expo_ids.iter().copied().collect(),
            }),
        }
    }

    /// Decode, validate, and derive a session from a raw bearer token.
    ///
    /// This is re-run on every gate evaluation; only the token itself is
    /// persisted between navigations.
    pub fn from_token(token: &str, now: DateTime<Utc>) -> Result<Self, TokenError> {
        let claims = claims::decode_claims(token)?;
        claims::validate_claims(&claims, now)?;
        Self::from_claims(&claims)
    }

    /// Whether this session administers expos through a static scope list.
    pub fn is_member_admin(&self) -> bool {
        matches!(self, Session::Member { .. })
    }
}
