//! Layered configuration for the Master Office backend.
//!
//! Sources, later ones winning:
//!
//! 1. `config/default.{toml,yaml,json}` (optional)
//! 2. `config/{RUN_ENV}.*` (optional, `RUN_ENV` defaults to `debug`)
//! 3. `MASTEROFFICE__SECTION__KEY` environment variables
//!
//! followed by `"secret_from_env"` marker substitution, see [`env_vars`].

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the application configuration from files and environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    env_vars::inject_env_vars(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to deserialize config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The file name is taken from `DOTENV_OVERRIDE`, then from a first command
/// line argument starting with `.env`, and defaults to `.env`. Returns the
/// path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_memory_store_settings() {
        let config = AppConfig::default();
        assert!(!config.use_firestore);
        assert!(!config.use_database);
        assert_eq!(config.directory.max_create_attempts, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "use_firestore": true, "firestore": { "project_id": "demo" } }"#,
        )
        .unwrap();

        let firestore = config.firestore.unwrap();
        assert!(config.use_firestore);
        assert_eq!(firestore.project_id.as_deref(), Some("demo"));
        assert_eq!(firestore.collection, "technician_configs");
        assert_eq!(firestore.timeout_secs, 15);
        assert_eq!(config.server.port, 8086);
    }

    #[test]
    fn marker_substitution_round_trips_config() {
        env::set_var("MASTEROFFICE_SECRET_DATABASE_URL", "sqlite::memory:");
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: env_vars::SECRET_MARKER.to_string(),
            }),
            ..AppConfig::default()
        };

        let config = apply_env_overrides_from_marker(config).unwrap();
        assert_eq!(config.database.unwrap().url, "sqlite::memory:");
        env::remove_var("MASTEROFFICE_SECRET_DATABASE_URL");
    }
}
