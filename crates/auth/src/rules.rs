//! The route → required-capability rule table.
//!
//! Rules are held as an explicit ordered list and matched with
//! most-specific (longest) prefix wins; ties fall back to declaration
//! order. This keeps rule resolution independent of any map iteration
//! order.

use crate::permissions::Capability;

/// One rule: a path prefix (relative to the expo-admin base) and the
/// capability required to view anything under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub required: Capability,
}

/// The ordered rule table for one route area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRules {
    rules: Vec<RouteRule>,
}

impl RouteRules {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The default table for the expo-admin area.
    ///
    /// A suffix matching no rule is **allowed** by default. That mirrors
    /// the upstream behavior: a route family added without a rule is open
    /// until one is written. Flagged as a gap, kept for parity.
    pub fn expo_admin_defaults() -> Self {
        Self::new(vec![
            RouteRule { prefix: "setting", required: Capability::ExpoDetailUpdate },
            RouteRule { prefix: "booths", required: Capability::BoothInfoUpdate },
            RouteRule { prefix: "events", required: Capability::ScheduleUpdate },
            RouteRule { prefix: "payments", required: Capability::PaymentView },
            RouteRule { prefix: "reservations", required: Capability::ReserverListView },
            RouteRule { prefix: "emails", required: Capability::EmailLogView },
            RouteRule { prefix: "operation", required: Capability::OperationsConfigUpdate },
            RouteRule { prefix: "inquiry", required: Capability::InquiryView },
        ])
    }

    /// Find the capability required for an admin suffix, if any rule matches.
    pub fn required_for(&self, admin_suffix: &str) -> Option<Capability> {
        self.rules
            .iter()
            .filter(|rule| prefix_matches(admin_suffix, rule.prefix))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| rule.required)
    }
}

/// Segment-aware prefix match: `booths` matches `booths` and `booths/5`,
/// never `boothsales`.
fn prefix_matches(suffix: &str, prefix: &str) -> bool {
    match suffix.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
