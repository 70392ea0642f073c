//! Booking Model

use serde::{Deserialize, Serialize};

/// Status assigned when a booking is created without one
pub const DEFAULT_BOOKING_STATUS: &str = "scheduled";

/// Booking entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    /// Opaque service reference, not checked against any collection
    pub service_id: String,
    pub service_name: String,
    /// Opaque stylist reference, not checked against any collection
    pub stylist_id: String,
    pub stylist_name: String,
    /// Free text, not parsed as a calendar date
    pub date: String,
    /// Free text, not parsed as a time of day
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub version: u64,
}

/// Create booking payload
///
/// Every field is optional at the serde level so that a missing required
/// field is reported by name instead of as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingCreate {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub stylist_id: Option<String>,
    pub stylist_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

/// Update booking payload
///
/// Absent keys keep the stored value. An empty string clears
/// `clientEmail` / `notes`. `version`, when given, must match the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingUpdate {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub stylist_id: Option<String>,
    pub stylist_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub version: Option<u64>,
}
