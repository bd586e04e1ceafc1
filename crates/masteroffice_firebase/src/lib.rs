//! Firestore storage for Master Office technician configurations
//!
//! Talks to the Firestore REST API (v1) with a service account token, or to
//! a local emulator when `firestore.emulator_host` is configured.
//!
//! # Example
//!
//! ```rust,no_run
//! use masteroffice_config::FirestoreConfig;
//! use masteroffice_firebase::FirestoreConfigStore;
//!
//! fn setup() -> Result<FirestoreConfigStore, masteroffice_firebase::FirestoreError> {
//!     let config = FirestoreConfig {
//!         project_id: Some("my-project-id".to_string()),
//!         key_path: Some("/path/to/service-account.json".to_string()),
//!         ..FirestoreConfig::default()
//!     };
//!     FirestoreConfigStore::from_config(&config)
//! }
//! ```

pub mod auth;
pub mod client;
pub mod document;
pub mod store;

pub use client::{FirestoreClient, FirestoreError};
pub use store::FirestoreConfigStore;
