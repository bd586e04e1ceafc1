//! Firestore implementation of the technician configuration store
//!
//! One document per activation code in the configured collection; the
//! document id is the raw code and the fields are the camelCase record.

use crate::client::{Document, FirestoreClient, FirestoreError};
use crate::document::{from_fields, to_fields, to_firestore_value};
use masteroffice_activation::ActivationCode;
use masteroffice_common::models::{TechnicianConfig, TechnicianEntry};
use masteroffice_common::store::{BoxFuture, ConfigStore, StoreError};
use masteroffice_config::FirestoreConfig;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

impl From<FirestoreError> for StoreError {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::NotFound(id) => StoreError::NotFound(id),
            FirestoreError::AlreadyExists(id) => StoreError::Conflict(id),
            other => StoreError::unavailable(other),
        }
    }
}

pub struct FirestoreConfigStore {
    client: FirestoreClient,
    collection: String,
}

impl FirestoreConfigStore {
    pub fn new(client: FirestoreClient, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    /// Builds the client and store from the `[firestore]` config section.
    pub fn from_config(config: &FirestoreConfig) -> Result<Self, FirestoreError> {
        let collection = config.collection.clone();
        let client = FirestoreClient::new(config.clone())?;
        info!(
            "Firestore store using collection '{}' at {}",
            collection,
            client.base_url()
        );
        Ok(Self::new(client, collection))
    }
}

fn encode_config(code: &ActivationCode, config: &TechnicianConfig) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(config) {
        Ok(Value::Object(map)) => Ok(to_fields(&map)),
        Ok(other) => Err(StoreError::invalid_record(
            code.as_str(),
            format!("record did not serialize to an object: {}", other),
        )),
        Err(e) => Err(StoreError::invalid_record(code.as_str(), e)),
    }
}

fn decode_document(document: &Document) -> Result<TechnicianEntry, StoreError> {
    let id = document.id();
    let code = ActivationCode::from_raw(id).map_err(|e| StoreError::invalid_record(id, e))?;
    let plain = from_fields(&document.fields).map_err(|e| StoreError::invalid_record(id, e))?;
    let config: TechnicianConfig =
        serde_json::from_value(plain).map_err(|e| StoreError::invalid_record(id, e))?;
    Ok(TechnicianEntry::new(code, config))
}

impl ConfigStore for FirestoreConfigStore {
    fn backend_name(&self) -> &'static str {
        "firestore"
    }

    fn list_all(&self) -> BoxFuture<'_, Vec<TechnicianEntry>, StoreError> {
        Box::pin(async move {
            let documents = self.client.list_documents(&self.collection).await?;
            debug!("Fetched {} Firestore documents", documents.len());

            // documents written by other clients may not match the schema
            let entries = documents
                .iter()
                .filter_map(|document| match decode_document(document) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!("Skipping unreadable document {}: {}", document.name, err);
                        None
                    }
                })
                .collect();
            Ok(entries)
        })
    }

    fn get<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, TechnicianConfig, StoreError> {
        Box::pin(async move {
            let document = self
                .client
                .get_document(&self.collection, code.as_str())
                .await?;
            decode_document(&document).map(|entry| entry.config)
        })
    }

    fn insert_new<'a>(
        &'a self,
        code: &'a ActivationCode,
        config: &'a TechnicianConfig,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            let fields = encode_config(code, config)?;
            self.client
                .create_document(&self.collection, code.as_str(), fields)
                .await?;
            info!("Technician config stored in Firestore for code: {}", code);
            Ok(())
        })
    }

    fn set_active<'a>(
        &'a self,
        code: &'a ActivationCode,
        active: bool,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            let mut fields = Map::new();
            fields.insert("active".to_string(), to_firestore_value(&Value::Bool(active)));
            self.client
                .patch_fields(&self.collection, code.as_str(), fields)
                .await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            self.client
                .delete_document(&self.collection, code.as_str())
                .await?;
            info!("Technician config deleted from Firestore for code: {}", code);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masteroffice_common::models::WorkDefaults;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COLLECTION_PATH: &str = "/v1/projects/demo/databases/(default)/documents/technician_configs";

    fn store_for(server: &MockServer) -> FirestoreConfigStore {
        let config = FirestoreConfig {
            project_id: Some("demo".to_string()),
            emulator_host: Some(server.uri().trim_start_matches("http://").to_string()),
            ..FirestoreConfig::default()
        };
        FirestoreConfigStore::from_config(&config).unwrap()
    }

    fn code(raw: &str) -> ActivationCode {
        ActivationCode::from_raw(raw).unwrap()
    }

    fn sample_config() -> TechnicianConfig {
        TechnicianConfig {
            technician_name: "Mario Rossi".to_string(),
            company_name: "ACME Marine".to_string(),
            user_id: "mario".to_string(),
            ships: vec!["Aurora".to_string()],
            locations: vec![],
            work: WorkDefaults::default(),
            api_key: "KEY123ABC".to_string(),
            server_url: String::new(),
            auto_sync: false,
            active: true,
            created_at: 1_700_000_000_000,
        }
    }

    fn document_json(id: &str, config: &TechnicianConfig) -> Value {
        let Value::Object(map) = serde_json::to_value(config).unwrap() else {
            panic!("config is not an object");
        };
        json!({
            "name": format!("projects/demo/databases/(default)/documents/technician_configs/{}", id),
            "fields": to_fields(&map),
        })
    }

    #[tokio::test]
    async fn get_decodes_document_fields() {
        let server = MockServer::start().await;
        let config = sample_config();
        Mock::given(method("GET"))
            .and(path(format!("{}/ABC123XYZ", COLLECTION_PATH)))
            .and(header("authorization", "Bearer owner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document_json("ABC123XYZ", &config)))
            .expect(1)
            .mount(&server)
            .await;

        let stored = store_for(&server).get(&code("ABC123XYZ")).await.unwrap();
        assert_eq!(stored, config);
    }

    #[tokio::test]
    async fn get_missing_document_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/ABC123XYZ", COLLECTION_PATH)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server).get(&code("ABC123XYZ")).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("ABC123XYZ".to_string()));
    }

    #[tokio::test]
    async fn insert_new_uses_code_as_document_id() {
        let server = MockServer::start().await;
        let config = sample_config();
        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .and(query_param("documentId", "ABC123XYZ"))
            .and(body_partial_json(json!({
                "fields": {
                    "active": { "booleanValue": true },
                    "createdAt": { "integerValue": "1700000000000" },
                    "locations": { "arrayValue": {} }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(document_json("ABC123XYZ", &config)))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server)
            .insert_new(&code("ABC123XYZ"), &config)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn insert_new_on_existing_document_is_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": { "code": 409, "status": "ALREADY_EXISTS" }
            })))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .insert_new(&code("ABC123XYZ"), &sample_config())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict("ABC123XYZ".to_string()));
    }

    #[tokio::test]
    async fn set_active_patches_only_the_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(format!("{}/ABC123XYZ", COLLECTION_PATH)))
            .and(query_param("updateMask.fieldPaths", "active"))
            .and(query_param("currentDocument.exists", "true"))
            .and(body_partial_json(json!({
                "fields": { "active": { "booleanValue": false } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server)
            .set_active(&code("ABC123XYZ"), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_missing_document_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("{}/ABC123XYZ", COLLECTION_PATH)))
            .and(query_param("currentDocument.exists", "true"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server).delete(&code("ABC123XYZ")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn server_errors_are_unavailable_not_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
            .mount(&server)
            .await;

        let err = store_for(&server).get(&code("ABC123XYZ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn list_all_follows_pages_and_skips_bad_documents() {
        let server = MockServer::start().await;
        let config = sample_config();

        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    document_json("BBB222BBB", &config),
                    { "name": "projects/demo/databases/(default)/documents/technician_configs/broken",
                      "fields": {} }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document_json("AAA111AAA", &config)],
                "nextPageToken": "next"
            })))
            .mount(&server)
            .await;

        let entries = store_for(&server).list_all().await.unwrap();
        let codes: Vec<&str> = entries.iter().map(|e| e.activation_code.as_str()).collect();
        assert_eq!(codes, vec!["AAA111AAA", "BBB222BBB"]);
    }

    #[tokio::test]
    async fn list_of_empty_collection_has_no_documents_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        assert!(store_for(&server).list_all().await.unwrap().is_empty());
    }

    #[test]
    fn missing_project_id_is_a_config_error() {
        let err = FirestoreConfigStore::from_config(&FirestoreConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, FirestoreError::ConfigError(_)));
    }
}
