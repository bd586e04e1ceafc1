// --- File: crates/masteroffice_common/src/models.rs ---

//! Technician configuration records as persisted per activation code.
//!
//! Field names serialize in camelCase so the JSON form matches the stored
//! document shape:
//!
//! ```json
//! { "technicianName": "...", "companyName": "...", "userId": "...",
//!   "ships": [], "locations": [],
//!   "work": { "defaultStartTime": "08:00", "defaultEndTime": "17:00",
//!             "defaultPauseMinutes": 60, "hourlyRates": [] },
//!   "apiKey": "...", "serverUrl": "", "autoSync": false,
//!   "active": true, "createdAt": 1700000000000 }
//! ```

use chrono::Utc;
use masteroffice_activation::ActivationCode;
use serde::{Deserialize, Serialize};

/// Default shift parameters handed to a technician's device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkDefaults {
    /// Shift start, `HH:MM`
    #[serde(default = "default_start_time")]
    pub default_start_time: String,

    /// Shift end, `HH:MM`
    #[serde(default = "default_end_time")]
    pub default_end_time: String,

    /// Unpaid pause in minutes
    #[serde(default = "default_pause_minutes")]
    pub default_pause_minutes: u32,

    /// Ordered hourly-rate rules, passed through untouched
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub hourly_rates: Vec<serde_json::Value>,
}

fn default_start_time() -> String {
    "08:00".to_string()
}

fn default_end_time() -> String {
    "17:00".to_string()
}

fn default_pause_minutes() -> u32 {
    60
}

impl Default for WorkDefaults {
    fn default() -> Self {
        Self {
            default_start_time: default_start_time(),
            default_end_time: default_end_time(),
            default_pause_minutes: default_pause_minutes(),
            hourly_rates: Vec::new(),
        }
    }
}

/// One technician's remotely controlled configuration.
///
/// Everything except `active` is fixed once the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TechnicianConfig {
    pub technician_name: String,
    pub company_name: String,
    pub user_id: String,

    /// Ship identifiers the technician may access
    #[serde(default)]
    pub ships: Vec<String>,

    /// Work location identifiers the technician may access
    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub work: WorkDefaults,

    /// Device-level API token, same shape as an activation code
    pub api_key: String,

    /// Sync endpoint; empty means unset
    #[serde(default)]
    pub server_url: String,

    #[serde(default)]
    pub auto_sync: bool,

    /// Inactive configurations no longer grant onboarding
    pub active: bool,

    /// Creation time in epoch milliseconds
    pub created_at: i64,
}

impl TechnicianConfig {
    /// Builds a fresh, active configuration with a new API key and `created_at = now`.
    pub fn new(
        technician_name: String,
        company_name: String,
        user_id: String,
        ships: Vec<String>,
        locations: Vec<String>,
        work: WorkDefaults,
    ) -> Self {
        Self {
            technician_name,
            company_name,
            user_id,
            ships,
            locations,
            work,
            api_key: ActivationCode::generate().into_inner(),
            server_url: String::new(),
            auto_sync: false,
            active: true,
            created_at: now_millis(),
        }
    }

    /// The sync endpoint, or `None` when unset.
    pub fn server_url(&self) -> Option<&str> {
        if self.server_url.is_empty() {
            None
        } else {
            Some(&self.server_url)
        }
    }
}

/// A stored configuration together with the code it is keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TechnicianEntry {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ABC123XYZ"))]
    pub activation_code: ActivationCode,

    #[serde(flatten)]
    pub config: TechnicianConfig,
}

impl TechnicianEntry {
    pub fn new(activation_code: ActivationCode, config: TechnicianConfig) -> Self {
        Self {
            activation_code,
            config,
        }
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
