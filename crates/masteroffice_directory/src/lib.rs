// --- File: crates/masteroffice_directory/src/lib.rs ---
//! Technician configuration directory for the Master Office back office.
//!
//! Creates, lists, toggles and deletes technician configurations keyed by
//! activation code, on top of any [`masteroffice_common::ConfigStore`], and
//! exposes them over HTTP together with the device activation endpoint.
//!
//! # API Endpoints
//!
//! - `GET    /technicians` - list, newest first
//! - `POST   /technicians` - create from a draft
//! - `GET    /technicians/summary` - total / active / inactive counters
//! - `GET    /technicians/{code}` - one configuration
//! - `DELETE /technicians/{code}` - remove a configuration
//! - `PUT    /technicians/{code}/active` - set the active flag
//! - `POST   /technicians/{code}/toggle` - flip the active flag
//! - `GET    /technicians/{code}/display` - raw and formatted code
//! - `POST   /activate` - redeem a code on a device

#[cfg(feature = "openapi")]
pub mod doc;
pub mod draft;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;
#[cfg(test)]
mod routes_test;

pub use draft::{DraftError, TechnicianDraft};
pub use logic::{CodeGenerator, ConfigDirectory, DirectoryError};
pub use models::{CodeDisplayPayload, DirectorySummary};
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::DirectoryApiDoc;
}
