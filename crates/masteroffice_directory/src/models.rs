// --- File: crates/masteroffice_directory/src/models.rs ---
//! Request and response bodies of the directory API.

use masteroffice_activation::ActivationCode;
use serde::{Deserialize, Serialize};

/// What a code presenter (e.g. a QR screen) needs to show a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CodeDisplayPayload {
    #[cfg_attr(feature = "openapi", schema(example = "ABC123XYZ"))]
    pub raw: String,
    #[cfg_attr(feature = "openapi", schema(example = "ABC-123-XYZ"))]
    pub formatted: String,
}

impl From<&ActivationCode> for CodeDisplayPayload {
    fn from(code: &ActivationCode) -> Self {
        Self {
            raw: code.as_str().to_string(),
            formatted: code.formatted(),
        }
    }
}

/// Counters for the back office home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DirectorySummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetActiveRequest {
    pub active: bool,
}

/// Body of `POST /activate`; the code may be typed with or without hyphens.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ActivateRequest {
    #[cfg_attr(feature = "openapi", schema(example = "abc-123-xyz"))]
    pub activation_code: String,
}

/// Activation state of one configuration after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TechnicianStatus {
    pub activation_code: String,
    pub active: bool,
}

/// Returned after a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatedTechnician {
    pub activation_code: String,
    pub display: CodeDisplayPayload,
    pub api_key: String,
}
