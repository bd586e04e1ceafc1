// --- File: crates/masteroffice_directory/src/handlers.rs ---
//! HTTP handlers for the technician directory.
//!
//! Codes in paths are accepted raw or formatted and in any case; they are
//! normalized before the store is touched, so a malformed code is a 400 and
//! never a 404.

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
};
use masteroffice_activation::ActivationCode;
use masteroffice_common::models::TechnicianEntry;
use masteroffice_common::MasterOfficeError;
use std::sync::Arc;
use tracing::debug;

use crate::draft::TechnicianDraft;
use crate::logic::{ConfigDirectory, DirectoryError};
use crate::models::{
    ActivateRequest, CodeDisplayPayload, CreatedTechnician, DirectorySummary, SetActiveRequest,
    TechnicianStatus,
};

/// Shared state for the directory handlers
#[derive(Clone)]
pub struct DirectoryState {
    pub directory: Arc<ConfigDirectory>,
}

type HandlerResult<T> = Result<T, MasterOfficeError>;

fn parse_code(raw: &str) -> Result<ActivationCode, MasterOfficeError> {
    ActivationCode::parse(raw).map_err(|err| DirectoryError::from(err).into())
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/technicians",
    responses(
        (status = 200, description = "All technician configurations, newest first", body = Vec<TechnicianEntry>),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn list_technicians_handler(
    State(state): State<Arc<DirectoryState>>,
) -> HandlerResult<Json<Vec<TechnicianEntry>>> {
    let entries = state.directory.list_for_display().await?;
    Ok(Json(entries))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/technicians",
    request_body = TechnicianDraft,
    responses(
        (status = 201, description = "Technician configuration created", body = CreatedTechnician),
        (status = 400, description = "Draft failed validation or body is not valid JSON"),
        (status = 500, description = "No free activation code could be found"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn create_technician_handler(
    State(state): State<Arc<DirectoryState>>,
    payload: Result<Json<TechnicianDraft>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<CreatedTechnician>)> {
    let Json(draft) = payload?;
    debug!("Creating technician {}", draft.technician_name.trim());
    let entry = state.directory.submit_draft(draft).await?;

    let created = CreatedTechnician {
        display: CodeDisplayPayload::from(&entry.activation_code),
        activation_code: entry.activation_code.into_inner(),
        api_key: entry.config.api_key,
    };
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/technicians/{code}",
    params(("code" = String, Path, description = "Activation code, with or without hyphens")),
    responses(
        (status = 200, description = "The technician configuration", body = TechnicianEntry),
        (status = 400, description = "Malformed activation code"),
        (status = 404, description = "No configuration for this code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn get_technician_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(code): Path<String>,
) -> HandlerResult<Json<TechnicianEntry>> {
    let code = parse_code(&code)?;
    let config = state.directory.get(&code).await?;
    Ok(Json(TechnicianEntry::new(code, config)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/technicians/{code}/active",
    params(("code" = String, Path, description = "Activation code, with or without hyphens")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Flag updated", body = TechnicianStatus),
        (status = 400, description = "Malformed activation code or request body"),
        (status = 404, description = "No configuration for this code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn set_active_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(code): Path<String>,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> HandlerResult<Json<TechnicianStatus>> {
    let code = parse_code(&code)?;
    let Json(body) = payload?;
    state.directory.set_active(&code, body.active).await?;
    Ok(Json(TechnicianStatus {
        activation_code: code.into_inner(),
        active: body.active,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/technicians/{code}/toggle",
    params(("code" = String, Path, description = "Activation code, with or without hyphens")),
    responses(
        (status = 200, description = "Flag flipped", body = TechnicianStatus),
        (status = 400, description = "Malformed activation code"),
        (status = 404, description = "No configuration for this code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn toggle_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(code): Path<String>,
) -> HandlerResult<Json<TechnicianStatus>> {
    let code = parse_code(&code)?;
    let active = state.directory.toggle(&code).await?;
    Ok(Json(TechnicianStatus {
        activation_code: code.into_inner(),
        active,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/technicians/{code}",
    params(("code" = String, Path, description = "Activation code, with or without hyphens")),
    responses(
        (status = 204, description = "Configuration deleted"),
        (status = 400, description = "Malformed activation code"),
        (status = 404, description = "No configuration for this code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn delete_technician_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(code): Path<String>,
) -> HandlerResult<StatusCode> {
    let code = parse_code(&code)?;
    state.directory.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/technicians/{code}/display",
    params(("code" = String, Path, description = "Activation code, with or without hyphens")),
    responses(
        (status = 200, description = "Raw and formatted code for presentation", body = CodeDisplayPayload),
        (status = 400, description = "Malformed activation code"),
        (status = 404, description = "No configuration for this code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn display_code_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(code): Path<String>,
) -> HandlerResult<Json<CodeDisplayPayload>> {
    let code = parse_code(&code)?;
    // only codes that exist are shown to a technician
    state.directory.get(&code).await?;
    Ok(Json(CodeDisplayPayload::from(&code)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/technicians/summary",
    responses(
        (status = 200, description = "Configuration counters", body = DirectorySummary),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Directory"
))]
pub async fn summary_handler(
    State(state): State<Arc<DirectoryState>>,
) -> HandlerResult<Json<DirectorySummary>> {
    Ok(Json(state.directory.summary().await?))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/activate",
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Configuration for the device", body = TechnicianEntry),
        (status = 400, description = "Malformed activation code or request body"),
        (status = 403, description = "Configuration deactivated"),
        (status = 404, description = "Unknown activation code"),
        (status = 503, description = "Configuration store unavailable")
    ),
    tag = "Activation"
))]
pub async fn activate_handler(
    State(state): State<Arc<DirectoryState>>,
    payload: Result<Json<ActivateRequest>, JsonRejection>,
) -> HandlerResult<Json<TechnicianEntry>> {
    let Json(body) = payload?;
    let entry = state.directory.redeem(&body.activation_code).await?;
    Ok(Json(entry))
}
