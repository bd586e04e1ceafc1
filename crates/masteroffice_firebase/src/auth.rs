//! Service account authentication for the Firestore REST API

use masteroffice_config::FirestoreConfig;
use std::{error::Error, path::Path};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// OAuth scope granting read/write access to Firestore documents.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Obtains an OAuth2 access token for Firestore from the service account key
/// at `config.key_path`.
///
/// # Errors
///
/// Fails when `key_path` is missing, the key file cannot be read, or Google's
/// token endpoint does not return a token.
pub async fn get_firestore_auth_token(
    config: &FirestoreConfig,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirestoreConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;
    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let auth_token = auth.token(&[DATASTORE_SCOPE]).await?;
    match auth_token.token() {
        Some(token) => Ok(token.to_string()),
        None => Err("No token available".into()),
    }
}
