// --- File: crates/masteroffice_directory/src/doc.rs ---
use utoipa::OpenApi;

use crate::draft::TechnicianDraft;
use crate::models::{
    ActivateRequest, CodeDisplayPayload, CreatedTechnician, DirectorySummary, SetActiveRequest,
    TechnicianStatus,
};
use masteroffice_common::models::{TechnicianConfig, TechnicianEntry, WorkDefaults};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list_technicians_handler,
        crate::handlers::create_technician_handler,
        crate::handlers::get_technician_handler,
        crate::handlers::set_active_handler,
        crate::handlers::toggle_handler,
        crate::handlers::delete_technician_handler,
        crate::handlers::display_code_handler,
        crate::handlers::summary_handler,
        crate::handlers::activate_handler,
    ),
    components(
        schemas(
            TechnicianDraft,
            TechnicianEntry,
            TechnicianConfig,
            WorkDefaults,
            CreatedTechnician,
            CodeDisplayPayload,
            DirectorySummary,
            SetActiveRequest,
            TechnicianStatus,
            ActivateRequest,
        )
    ),
    tags(
        (name = "Directory", description = "Technician configuration management"),
        (name = "Activation", description = "Device onboarding with an activation code")
    ),
    servers(
        (url = "/api", description = "Master Office API server")
    )
)]
pub struct DirectoryApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = DirectoryApiDoc::openapi();
        for path in [
            "/technicians",
            "/technicians/{code}",
            "/technicians/{code}/active",
            "/technicians/{code}/toggle",
            "/technicians/{code}/display",
            "/technicians/summary",
            "/activate",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn code_routes_document_malformed_code() {
        let doc = DirectoryApiDoc::openapi();
        let paths = &doc.paths.paths;
        let operations = [
            paths["/technicians/{code}"].get.as_ref(),
            paths["/technicians/{code}"].delete.as_ref(),
            paths["/technicians/{code}/active"].put.as_ref(),
            paths["/technicians/{code}/toggle"].post.as_ref(),
            paths["/technicians/{code}/display"].get.as_ref(),
        ];
        for operation in operations {
            let operation = operation.unwrap();
            assert!(
                operation.responses.responses.contains_key("400"),
                "{:?} lacks a 400 response",
                operation.operation_id
            );
        }

        let display = paths["/technicians/{code}/display"].get.as_ref().unwrap();
        assert!(display.responses.responses.contains_key("503"));
    }
}
