// --- File: crates/masteroffice_directory/src/routes_test.rs ---
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use masteroffice_activation::ActivationCode;
use masteroffice_common::models::{TechnicianConfig, WorkDefaults};
use masteroffice_common::store::{ConfigStore, MemoryConfigStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::logic::ConfigDirectory;
use crate::routes::routes;

async fn app_with(entries: &[(&str, bool)]) -> Router {
    let store = MemoryConfigStore::new();
    for (i, (raw, active)) in entries.iter().enumerate() {
        let config = TechnicianConfig {
            technician_name: format!("Tech {}", i),
            company_name: "ACME Marine".to_string(),
            user_id: format!("tech{}", i),
            ships: vec![],
            locations: vec![],
            work: WorkDefaults::default(),
            api_key: "KEY000KEY".to_string(),
            server_url: String::new(),
            auto_sync: false,
            active: *active,
            created_at: i as i64,
        };
        store
            .insert_new(&ActivationCode::from_raw(*raw).unwrap(), &config)
            .await
            .unwrap();
    }
    routes(Arc::new(ConfigDirectory::new(Arc::new(store))))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let response = app
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn create_returns_201_with_code_payload() {
    let app = app_with(&[]).await;

    let (status, body) = send(
        app.clone(),
        "POST",
        "/technicians",
        Some(json!({
            "technicianName": "Mario Rossi",
            "companyName": "ACME Marine",
            "userId": "mario",
            "ships": ["Aurora"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let code = body["activationCode"].as_str().unwrap().to_string();
    assert!(masteroffice_activation::is_valid(&code));
    assert_eq!(body["display"]["formatted"], masteroffice_activation::format(&code));

    let (status, body) = send(app, "GET", &format!("/technicians/{}", code), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["technicianName"], "Mario Rossi");
    assert_eq!(body["active"], true);
}

#[tokio::test]
async fn create_with_blank_name_is_400() {
    let app = app_with(&[]).await;

    let (status, body) = send(
        app,
        "POST",
        "/technicians",
        Some(json!({ "technicianName": " ", "companyName": "ACME", "userId": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn get_accepts_formatted_code_and_rejects_malformed() {
    let app = app_with(&[("ABC123XYZ", true)]).await;

    let (status, body) = send(app.clone(), "GET", "/technicians/abc-123-xyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activationCode"], "ABC123XYZ");

    let (status, _) = send(app.clone(), "GET", "/technicians/ABC-123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app, "GET", "/technicians/ZZZ999ZZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = app_with(&[("AAA111AAA", true), ("BBB222BBB", true)]).await;

    let (status, body) = send(app, "GET", "/technicians", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["activationCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["BBB222BBB", "AAA111AAA"]);
}

#[tokio::test]
async fn set_active_then_toggle() {
    let app = app_with(&[("ABC123XYZ", true)]).await;

    let (status, body) = send(
        app.clone(),
        "PUT",
        "/technicians/ABC123XYZ/active",
        Some(json!({ "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "activationCode": "ABC123XYZ", "active": false }));

    let (status, body) = send(app, "POST", "/technicians/ABC123XYZ/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
}

#[tokio::test]
async fn delete_then_delete_again_is_404() {
    let app = app_with(&[("ABC123XYZ", true)]).await;

    let (status, _) = send(app.clone(), "DELETE", "/technicians/ABC123XYZ", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(app, "DELETE", "/technicians/ABC123XYZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn display_returns_raw_and_formatted() {
    let app = app_with(&[("ABC123XYZ", true)]).await;

    let (status, body) = send(app, "GET", "/technicians/abc123xyz/display", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "raw": "ABC123XYZ", "formatted": "ABC-123-XYZ" }));
}

#[tokio::test]
async fn summary_is_not_mistaken_for_a_code() {
    let app = app_with(&[("AAA111AAA", true), ("BBB222BBB", false)]).await;

    let (status, body) = send(app, "GET", "/technicians/summary", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total": 2, "active": 1, "inactive": 1 }));
}

#[tokio::test]
async fn activate_maps_each_failure_to_its_status() {
    let app = app_with(&[("ACT111ACT", true), ("OFF000OFF", false)]).await;

    let (status, body) = send(
        app.clone(),
        "POST",
        "/activate",
        Some(json!({ "activationCode": "act-111-act" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "tech0");

    let cases = [
        ("nope", StatusCode::BAD_REQUEST),
        ("ZZZ-999-ZZZ", StatusCode::NOT_FOUND),
        ("OFF-000-OFF", StatusCode::FORBIDDEN),
    ];
    for (input, expected) in cases {
        let (status, _) = send(
            app.clone(),
            "POST",
            "/activate",
            Some(json!({ "activationCode": input })),
        )
        .await;
        assert_eq!(status, expected, "input {input}");
    }
}

#[tokio::test]
async fn unreadable_bodies_use_the_json_error_shape() {
    let app = app_with(&[("ABC123XYZ", true)]).await;

    let cases = [
        ("POST", "/technicians", Some("application/json"), "{ not json"),
        ("POST", "/activate", None, r#"{ "activationCode": "ABC-123-XYZ" }"#),
        (
            "PUT",
            "/technicians/ABC123XYZ/active",
            Some("application/json"),
            r#"{ "active": "yes" }"#,
        ),
    ];
    for (method, uri, content_type, body) in cases {
        let (status, body) = send_raw(app.clone(), method, uri, content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["error"]["code"], 400, "{method} {uri}");
        assert_eq!(body["error"]["retryable"], false, "{method} {uri}");
        assert!(body["error"]["message"].is_string(), "{method} {uri}");
    }

    let (_, body) = send(app, "GET", "/technicians/ABC123XYZ", None).await;
    assert_eq!(body["active"], true);
}
