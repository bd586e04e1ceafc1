// --- File: crates/masteroffice_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The HTTP-facing error type shared by the Master Office crates.
///
/// Each crate converts its own errors into this enum at the HTTP boundary.
/// `NotFoundError` and `StoreUnavailable` stay separate so a missing record
/// is never reported as an outage or the other way round.
#[derive(Error, Debug)]
pub enum MasterOfficeError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request was understood but refused
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Request input failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The configuration store could not be reached or refused the request
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for MasterOfficeError {
    fn status_code(&self) -> u16 {
        match self {
            MasterOfficeError::ConfigError(_) => 500,
            MasterOfficeError::ForbiddenError(_) => 403,
            MasterOfficeError::ValidationError(_) => 400,
            MasterOfficeError::StoreUnavailable(_) => 503,
            MasterOfficeError::NotFoundError(_) => 404,
            MasterOfficeError::InternalError(_) => 500,
        }
    }
}

// Constructors used at the crate boundaries
pub fn config_error<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::NotFoundError(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::ForbiddenError(message.to_string())
}

pub fn store_unavailable<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::StoreUnavailable(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> MasterOfficeError {
    MasterOfficeError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_outage_have_distinct_statuses() {
        assert_eq!(not_found("ABC123XYZ").status_code(), 404);
        assert_eq!(store_unavailable("connection refused").status_code(), 503);
    }

    #[test]
    fn constructors_pick_their_status() {
        assert_eq!(validation_error("bad input").status_code(), 400);
        assert_eq!(forbidden("deactivated").status_code(), 403);
        assert_eq!(internal_error("boom").status_code(), 500);
        assert_eq!(config_error("missing").status_code(), 500);
    }

    #[test]
    fn messages_carry_the_variant_prefix() {
        assert_eq!(
            store_unavailable("timeout").to_string(),
            "Store unavailable: timeout"
        );
    }
}
