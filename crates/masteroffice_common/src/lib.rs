// --- File: crates/masteroffice_common/src/lib.rs ---

// Shared building blocks for the Master Office crates.
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Technician configuration records
pub mod store; // Storage contract and in-memory backend

// Re-export error types and utilities for easier access
pub use error::{
    config_error, forbidden, internal_error, not_found, store_unavailable, validation_error,
    HttpStatusCode, MasterOfficeError,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::init_with_config;

pub use models::{now_millis, TechnicianConfig, TechnicianEntry, WorkDefaults};
pub use store::{BoxFuture, ConfigStore, MemoryConfigStore, StoreError};
