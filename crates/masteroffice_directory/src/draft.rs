// --- File: crates/masteroffice_directory/src/draft.rs ---
//! Validation of the "create technician" form submission.

use masteroffice_common::models::{TechnicianConfig, WorkDefaults};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a time in HH:MM format, got {value:?}")]
    InvalidTime { field: &'static str, value: String },
}

/// A technician as entered in the back office, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TechnicianDraft {
    #[cfg_attr(feature = "openapi", schema(example = "Mario Rossi"))]
    #[serde(default)]
    pub technician_name: String,

    #[cfg_attr(feature = "openapi", schema(example = "ACME Marine"))]
    #[serde(default)]
    pub company_name: String,

    #[cfg_attr(feature = "openapi", schema(example = "mario.rossi"))]
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub ships: Vec<String>,

    #[serde(default)]
    pub locations: Vec<String>,

    /// Shift defaults; omitted means 08:00 to 17:00 with a 60 minute pause
    #[serde(default)]
    pub work: Option<WorkDefaults>,
}

impl TechnicianDraft {
    /// Checks the draft and builds a fresh, active configuration from it.
    ///
    /// Names are trimmed, ship and location lists lose blanks and duplicates.
    pub fn validate(self) -> Result<TechnicianConfig, DraftError> {
        let technician_name = required("technicianName", &self.technician_name)?;
        let company_name = required("companyName", &self.company_name)?;
        let user_id = required("userId", &self.user_id)?;

        let work = self.work.unwrap_or_default();
        check_time("defaultStartTime", &work.default_start_time)?;
        check_time("defaultEndTime", &work.default_end_time)?;

        Ok(TechnicianConfig::new(
            technician_name,
            company_name,
            user_id,
            dedupe(self.ships),
            dedupe(self.locations),
            work,
        ))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Strict `HH:MM`, 24-hour clock.
fn check_time(field: &'static str, value: &str) -> Result<(), DraftError> {
    let invalid = || DraftError::InvalidTime {
        field,
        value: value.to_string(),
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(())
}

/// Trims entries and drops blanks and repeats, keeping first-seen order.
fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}
