//! Firestore REST client
//!
//! A thin wrapper over the Firestore v1 documents API covering exactly what
//! the configuration store needs: conditional create, point read, paged list,
//! single-field patch and conditional delete.

use crate::auth::get_firestore_auth_token;
use masteroffice_common::create_client;
use masteroffice_config::FirestoreConfig;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, error};

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com";
const PAGE_SIZE: &str = "300";

/// Errors that can occur when talking to Firestore
#[derive(Error, Debug)]
pub enum FirestoreError {
    /// Error during authentication with Google
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to Firestore
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// The addressed document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A document with this id already exists
    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    /// Any other non-success response
    #[error("Firestore API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

/// A Firestore document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Full resource name, `projects/.../documents/{collection}/{id}`
    pub name: String,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// The document id, i.e. the last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

/// Client for the Firestore documents API of one project.
pub struct FirestoreClient {
    client: Client,
    config: FirestoreConfig,
    base_url: String,
}

impl FirestoreClient {
    /// Builds a client for `config.project_id`.
    ///
    /// When `emulator_host` is set, requests go to `http://{emulator_host}`
    /// without OAuth.
    pub fn new(config: FirestoreConfig) -> Result<Self, FirestoreError> {
        let project_id = config.project_id.as_deref().ok_or_else(|| {
            FirestoreError::ConfigError("Missing project_id in FirestoreConfig".to_string())
        })?;

        let host = match &config.emulator_host {
            Some(emulator) => format!("http://{}", emulator),
            None => {
                if config.key_path.is_none() {
                    return Err(FirestoreError::ConfigError(
                        "Missing key_path in FirestoreConfig".to_string(),
                    ));
                }
                FIRESTORE_HOST.to_string()
            }
        };

        let base_url = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            host, project_id
        );
        let client = create_client(config.timeout_secs, true)?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Base URL of the documents API, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn bearer_token(&self) -> Result<String, FirestoreError> {
        if self.config.emulator_host.is_some() {
            // the emulator accepts this fixed token as an admin credential
            return Ok("owner".to_string());
        }
        get_firestore_auth_token(&self.config)
            .await
            .map_err(|e| FirestoreError::AuthError(e.to_string()))
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, document_id)
    }

    /// Creates `collection/document_id`, failing with `AlreadyExists` when taken.
    pub async fn create_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, FirestoreError> {
        debug!("Creating Firestore document {}/{}", collection, document_id);

        let token = self.bearer_token().await?;
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, collection))
            .query(&[("documentId", document_id)])
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let response = check_status(response, document_id).await?;
        Ok(response.json().await?)
    }

    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Document, FirestoreError> {
        debug!("Fetching Firestore document {}/{}", collection, document_id);

        let token = self.bearer_token().await?;
        let response = self
            .client
            .get(self.document_url(collection, document_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let response = check_status(response, document_id).await?;
        Ok(response.json().await?)
    }

    /// Lists every document of `collection`, following page tokens.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, FirestoreError> {
        debug!("Listing Firestore collection {}", collection);

        let token = self.bearer_token().await?;
        let url = format!("{}/{}", self.base_url, collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE)])
                .header(header::AUTHORIZATION, format!("Bearer {}", token));
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let response = check_status(request.send().await?, collection).await?;
            let page: ListDocumentsResponse = response.json().await?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(documents)
    }

    /// Overwrites the listed fields of an existing document and nothing else.
    pub async fn patch_fields(
        &self,
        collection: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), FirestoreError> {
        debug!("Patching Firestore document {}/{}", collection, document_id);

        let mut query: Vec<(&str, &str)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let token = self.bearer_token().await?;
        let response = self
            .client
            .patch(self.document_url(collection, document_id))
            .query(&query)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        check_status(response, document_id).await?;
        Ok(())
    }

    /// Deletes an existing document, failing with `NotFound` when absent.
    pub async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), FirestoreError> {
        debug!("Deleting Firestore document {}/{}", collection, document_id);

        let token = self.bearer_token().await?;
        let response = self
            .client
            .delete(self.document_url(collection, document_id))
            .query(&[("currentDocument.exists", "true")])
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        check_status(response, document_id).await?;
        Ok(())
    }
}

async fn check_status(response: Response, subject: &str) -> Result<Response, FirestoreError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(FirestoreError::NotFound(subject.to_string())),
        StatusCode::CONFLICT => Err(FirestoreError::AlreadyExists(subject.to_string())),
        status => {
            let message = response.text().await?;
            error!("Firestore returned {} for {}: {}", status, subject, message);
            Err(FirestoreError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
