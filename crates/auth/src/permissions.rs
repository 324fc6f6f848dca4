//! Capability model for expo-admin sessions.

use serde::{Deserialize, Serialize};

/// A named boolean permission controlling one feature area.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    ExpoDetailUpdate,
    BoothInfoUpdate,
    ScheduleUpdate,
    PaymentView,
    ReserverListView,
    EmailLogView,
    OperationsConfigUpdate,
    InquiryView,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::ExpoDetailUpdate,
        Capability::BoothInfoUpdate,
        Capability::ScheduleUpdate,
        Capability::PaymentView,
        Capability::ReserverListView,
        Capability::EmailLogView,
        Capability::OperationsConfigUpdate,
        Capability::InquiryView,
    ];

    /// The upstream wire name of this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ExpoDetailUpdate => "isExpoDetailUpdate",
            Capability::BoothInfoUpdate => "isBoothInfoUpdate",
            Capability::ScheduleUpdate => "isScheduleUpdate",
            Capability::PaymentView => "isPaymentView",
            Capability::ReserverListView => "isReserverListView",
            Capability::EmailLogView => "isEmailLogView",
            Capability::OperationsConfigUpdate => "isOperationsConfigUpdate",
            Capability::InquiryView => "isInquiryView",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fetched per-capability grant record for one admin session.
///
/// Fetched lazily, once per session context. Callers that have not yet
/// resolved it hold `None`, which means **pending**, distinct from a
/// record with every flag false. Absent keys in the fetched record
/// default to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    #[serde(rename = "isExpoDetailUpdate", default)]
    pub expo_detail_update: bool,

    #[serde(rename = "isBoothInfoUpdate", default)]
    pub booth_info_update: bool,

    #[serde(rename = "isScheduleUpdate", default)]
    pub schedule_update: bool,

    #[serde(rename = "isPaymentView", default)]
    pub payment_view: bool,

    #[serde(rename = "isReserverListView", default)]
    pub reserver_list_view: bool,

    #[serde(rename = "isEmailLogView", default)]
    pub email_log_view: bool,

    #[serde(rename = "isOperationsConfigUpdate", default)]
    pub operations_config_update: bool,

    #[serde(rename = "isInquiryView", default)]
    pub inquiry_view: bool,
}

impl PermissionSet {
    /// A record with every capability granted.
    pub fn all_granted() -> Self {
        Self {
            expo_detail_update: true,
            booth_info_update: true,
            schedule_update: true,
            payment_view: true,
            reserver_list_view: true,
            email_log_view: true,
            operations_config_update: true,
            inquiry_view: true,
        }
    }

    /// A record with every capability denied. Same as `Default`.
    pub fn none_granted() -> Self {
        Self::default()
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ExpoDetailUpdate => self.expo_detail_update,
            Capability::BoothInfoUpdate => self.booth_info_update,
            Capability::ScheduleUpdate => self.schedule_update,
            Capability::PaymentView => self.payment_view,
            Capability::ReserverListView => self.reserver_list_view,
            Capability::EmailLogView => self.email_log_view,
            Capability::OperationsConfigUpdate => self.operations_config_update,
            Capability::InquiryView => self.inquiry_view,
        }
    }
}
