//! Environment variable handling for the Master Office backend.
//!
//! Configuration values can be overridden with `MASTEROFFICE__SECTION__KEY`
//! variables, and any config value set to the literal `"secret_from_env"` is
//! replaced with `MASTEROFFICE_SECRET_SECTION_KEY` (or the legacy
//! `SECTION_KEY`) at load time.

use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "MASTEROFFICE";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "MASTEROFFICE_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that requests a secret to be read from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
///
/// `"firestore.key_path"` becomes `"MASTEROFFICE_SECRET_FIRESTORE_KEY_PATH"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the legacy, unprefixed variable name
///
/// `"firestore.key_path"` becomes `"FIRESTORE_KEY_PATH"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a secret path, falling back to the legacy name.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        return Some(value);
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var).ok()
}

/// Replace every `"secret_from_env"` string in `value` with its environment value.
///
/// Returns `true` if any value was replaced. Markers without a matching
/// variable are left in place and logged.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_secret_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("firestore.key_path"),
            "MASTEROFFICE_SECRET_FIRESTORE_KEY_PATH"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(
            legacy_secret_path_to_env_var("firestore.key_path"),
            "FIRESTORE_KEY_PATH"
        );
        assert_eq!(legacy_secret_path_to_env_var("token"), "TOKEN");
    }

    #[test]
    fn test_inject_env_vars_replaces_markers() {
        env::set_var("MASTEROFFICE_SECRET_TESTSVC_API_TOKEN", "s3cr3t");
        let mut value = serde_json::json!({
            "testsvc": { "api_token": "secret_from_env", "plain": "untouched" }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["testsvc"]["api_token"], "s3cr3t");
        assert_eq!(value["testsvc"]["plain"], "untouched");
        env::remove_var("MASTEROFFICE_SECRET_TESTSVC_API_TOKEN");
    }

    #[test]
    fn test_inject_env_vars_keeps_unresolved_marker() {
        let mut value = serde_json::json!({ "nosuchsvc": { "nosuchkey": "secret_from_env" } });

        assert!(!inject_env_vars(&mut value));
        assert_eq!(value["nosuchsvc"]["nosuchkey"], SECRET_MARKER);
    }
}
