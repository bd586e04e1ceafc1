// --- File: crates/services/masteroffice_backend/src/lib.rs ---
//! HTTP service for the Master Office back office.

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use masteroffice_directory::ConfigDirectory;

pub mod app_state;
pub mod service_factory;

use app_state::AppState;

async fn health(State(directory): State<Arc<ConfigDirectory>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": directory.backend_name(),
    }))
}

/// Builds the `/api` router: welcome text, health check and the directory routes.
pub fn app(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Master Office API!" }))
        .route("/health", get(health))
        .with_state(state.directory.clone())
        .merge(masteroffice_directory::routes(state.directory.clone()));

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use masteroffice_common::store::MemoryConfigStore;
    use masteroffice_config::AppConfig;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::with_store(
            Arc::new(AppConfig::default()),
            Arc::new(MemoryConfigStore::new()),
        );
        app(&state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_store_backend() {
        let (status, body) = get_json(test_app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "store": "memory" }));
    }

    #[tokio::test]
    async fn directory_routes_are_nested_under_api() {
        let (status, body) = get_json(test_app(), "/api/technicians").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = get_json(test_app(), "/api/technicians/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/technicians")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
