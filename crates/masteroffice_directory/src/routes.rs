// --- File: crates/masteroffice_directory/src/routes.rs ---
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    activate_handler, create_technician_handler, delete_technician_handler, display_code_handler,
    get_technician_handler, list_technicians_handler, set_active_handler, summary_handler,
    toggle_handler, DirectoryState,
};
use crate::logic::ConfigDirectory;

/// Creates the router for the directory and device activation endpoints.
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes(directory: Arc<ConfigDirectory>) -> Router {
    info!(
        "Directory routes initialized (store: {})",
        directory.backend_name()
    );
    let state = Arc::new(DirectoryState { directory });

    Router::new()
        .route(
            "/technicians",
            get(list_technicians_handler).post(create_technician_handler),
        )
        .route("/technicians/summary", get(summary_handler))
        .route(
            "/technicians/{code}",
            get(get_technician_handler).delete(delete_technician_handler),
        )
        .route("/technicians/{code}/active", put(set_active_handler))
        .route("/technicians/{code}/toggle", post(toggle_handler))
        .route("/technicians/{code}/display", get(display_code_handler))
        .route("/activate", post(activate_handler))
        .with_state(state)
}
