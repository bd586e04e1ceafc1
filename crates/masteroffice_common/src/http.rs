// --- File: crates/masteroffice_common/src/http.rs ---
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{validation_error, HttpStatusCode, MasterOfficeError};

pub mod client;

/// Extension trait for MasterOfficeError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for MasterOfficeError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
                "retryable": status_code == StatusCode::SERVICE_UNAVAILABLE,
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for MasterOfficeError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

// Unreadable request bodies answer with the same error shape as everything else.
impl From<JsonRejection> for MasterOfficeError {
    fn from(rejection: JsonRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_retryable_503() {
        let response = MasterOfficeError::StoreUnavailable("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = MasterOfficeError::NotFoundError("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
