//! Booking Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type BookingId = Thing;

/// Booking record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookingId>,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    pub service_id: String,
    pub service_name: String,
    pub stylist_id: String,
    pub stylist_name: String,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis, set by updates only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default = "default_version")]
    pub version: u64,
}

pub(crate) fn default_version() -> u64 {
    1
}
