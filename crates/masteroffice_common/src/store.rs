// --- File: crates/masteroffice_common/src/store.rs ---
//! Storage contract for technician configurations.
//!
//! Every backend (SQL, Firestore, in-memory) implements [`ConfigStore`]. The
//! trait returns boxed futures so the backend can be chosen at runtime and
//! handed around as `Arc<dyn ConfigStore>`.

use masteroffice_activation::ActivationCode;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::models::{TechnicianConfig, TechnicianEntry};

pub mod memory;

pub use memory::MemoryConfigStore;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Errors a store reports back to the directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No configuration is stored under this code
    #[error("No configuration for activation code {0}")]
    NotFound(String),

    /// A configuration already exists under this code
    #[error("Activation code {0} is already taken")]
    Conflict(String),

    /// Transport, authentication or backend failure; worth retrying later
    #[error("Configuration store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded
    #[error("Stored record for {code} is invalid: {message}")]
    InvalidRecord { code: String, message: String },
}

impl StoreError {
    pub fn unavailable<T: std::fmt::Display>(message: T) -> Self {
        StoreError::Unavailable(message.to_string())
    }

    pub fn invalid_record<T: std::fmt::Display>(code: &str, message: T) -> Self {
        StoreError::InvalidRecord {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

/// Keyed storage of technician configurations.
///
/// Every operation is keyed by activation code; there is no secondary index.
pub trait ConfigStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Every stored configuration with its code, in no particular order.
    fn list_all(&self) -> BoxFuture<'_, Vec<TechnicianEntry>, StoreError>;

    /// Point lookup by exact code.
    fn get<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, TechnicianConfig, StoreError>;

    /// Stores `config` under `code` only if the code is free.
    ///
    /// Must be an atomic check-and-set: when the code exists the call fails
    /// with [`StoreError::Conflict`] and the existing record is untouched.
    fn insert_new<'a>(
        &'a self,
        code: &'a ActivationCode,
        config: &'a TechnicianConfig,
    ) -> BoxFuture<'a, (), StoreError>;

    /// Sets the `active` flag and nothing else.
    fn set_active<'a>(
        &'a self,
        code: &'a ActivationCode,
        active: bool,
    ) -> BoxFuture<'a, (), StoreError>;

    /// Removes the configuration permanently.
    fn delete<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, (), StoreError>;
}
