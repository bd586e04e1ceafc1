//! SQL storage for Master Office technician configurations
//!
//! Uses SQLx with the `Any` driver so the same store runs on SQLite or
//! PostgreSQL, selected by the URL scheme and the crate features.
//!
//! # Example
//!
//! ```rust,no_run
//! use masteroffice_common::ConfigStore;
//! use masteroffice_db::{DbClient, SqlConfigStore};
//!
//! async fn setup() -> Result<SqlConfigStore, Box<dyn std::error::Error>> {
//!     let client = DbClient::from_url("sqlite:data/masteroffice.db").await?;
//!     let store = SqlConfigStore::new(client);
//!     store.init_schema().await?;
//!     println!("using {} store", store.backend_name());
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use repository::RepositoryFactory;

pub use repositories::{SqlConfigStore, TechnicianConfigRepositoryFactory};
