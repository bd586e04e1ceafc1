// --- File: crates/masteroffice_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level for the `masteroffice` targets, e.g. "info" or "debug".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String, // e.g. "sqlite:data/masteroffice.db", loaded via MASTEROFFICE__DATABASE__URL
}

// --- Firestore Config ---
// Holds non-secret Firestore config. The service account key file path may be a secret marker.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FirestoreConfig {
    pub project_id: Option<String>, // Mandatory
    pub key_path: Option<String>,   // Mandatory unless emulator_host is set
    /// Collection holding one document per activation code.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// host:port of a Firestore emulator; disables OAuth when set.
    #[serde(default)]
    pub emulator_host: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_collection() -> String {
    "technician_configs".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            key_path: None,
            collection: default_collection(),
            emulator_host: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Directory Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DirectoryConfig {
    /// Upper bound on code generations per create before giving up.
    #[serde(default = "default_max_create_attempts")]
    pub max_create_attempts: u32,
}

fn default_max_create_attempts() -> u32 {
    5
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_create_attempts: default_max_create_attempts(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    // Server config is mandatory in files, defaulted for tests
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_firestore: bool,
    #[serde(default)]
    pub use_database: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub firestore: Option<FirestoreConfig>,

    #[serde(default)]
    pub directory: DirectoryConfig,
}
