//! Route-path parsing and normalization.
//!
//! Access rules are written once per route *family*, so any dynamic expo
//! segment is replaced by a placeholder before rule matching. The concrete
//! id is carried alongside for scope checks.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ExpoId;

/// Placeholder that replaces a concrete expo id in a normalized path.
pub const EXPO_SEGMENT_PLACEHOLDER: &str = ":expoId";

/// Which area of the application a path belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteArea {
    /// Admin pages scoped to one expo (`/expos/{id}/admin/...`).
    ExpoAdmin,
    /// Platform-operator pages (`/platform/...`).
    PlatformAdmin,
    /// Everything else (consumer pages, index, auth screens).
    Public,
}

/// A parsed, normalized route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    raw: String,
    normalized: String,
    area: RouteArea,
    expo_id: Option<ExpoId>,
    admin_suffix: Option<String>,
}

impl RoutePath {
    /// Parse a raw path into a route family.
    ///
    /// The path must be absolute (leading `/`). Query strings and fragments
    /// are not accepted here; the caller strips them.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if !raw.starts_with('/') {
            return Err(DomainError::invalid_route(format!(
                "path must be absolute: {:?}",
                raw
            )));
        }
        if raw.contains('?') || raw.contains('#') {
            return Err(DomainError::invalid_route(
                "query/fragment must be stripped before parsing",
            ));
        }

        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();

        // `/expos/{id}/admin[/...]` is the expo-admin family.
        if segments.len() >= 3 && segments[0] == "expos" && segments[2] == "admin" {
            let expo_id: ExpoId = segments[1].parse().map_err(|_| {
                DomainError::invalid_route(format!("expo segment is not an id: {:?}", segments[1]))
            })?;
            let suffix = segments[3..].join("/");
            let normalized = if suffix.is_empty() {
                format!("/expos/{}/admin", EXPO_SEGMENT_PLACEHOLDER)
            } else {
                format!("/expos/{}/admin/{}", EXPO_SEGMENT_PLACEHOLDER, suffix)
            };
            return Ok(Self {
                raw: raw.to_string(),
                normalized,
                area: RouteArea::ExpoAdmin,
                expo_id: Some(expo_id),
                admin_suffix: Some(suffix),
            });
        }

        if segments.first() == Some(&"platform") {
            return Ok(Self {
                raw: raw.to_string(),
                normalized: normalize_segments(&segments),
                area: RouteArea::PlatformAdmin,
                expo_id: None,
                admin_suffix: None,
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            normalized: normalize_segments(&segments),
            area: RouteArea::Public,
            expo_id: None,
            admin_suffix: None,
        })
    }

    /// The path exactly as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The path with any dynamic expo segment replaced by a placeholder.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn area(&self) -> RouteArea {
        self.area
    }

    /// The concrete expo id for expo-scoped paths.
    pub fn expo_id(&self) -> Option<ExpoId> {
        self.expo_id
    }

    /// The part of an expo-admin path after `/admin/` (empty for the index).
    ///
    /// This is what the capability rule table matches against.
    pub fn admin_suffix(&self) -> Option<&str> {
        self.admin_suffix.as_deref()
    }
}

impl core::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.normalized)
    }
}

fn normalize_segments(segments: &[&str]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
