// tests/http_api.rs
use axum::http::{StatusCode, header};
use expedientes::domain::user::Role;
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;

use support::{
    ADMIN_PASSWORD, ADMIN_USERNAME, assert_error_response, body_bytes, body_json, empty_request,
    json_request, test_app,
};

fn case_body(code: &str, property_name: &str) -> serde_json::Value {
    json!({
        "code": code,
        "property_name": property_name,
        "requested_by": "Apoderado",
        "archive_location": "Archivo 2",
        "checklist": { "1": "presenta", "11": "no_presenta" }
    })
}

#[tokio::test]
async fn health_reports_database_reachable() {
    let app = test_app().await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = test_app().await;

    for (method, uri) in [
        ("GET", "/api/v1/cases"),
        ("GET", "/api/v1/auth/me"),
        ("GET", "/api/v1/audit-logs"),
        ("GET", "/api/v1/users"),
    ] {
        let response = app
            .router()
            .oneshot(empty_request(method, uri, None))
            .await
            .unwrap();
        assert_error_response(response, StatusCode::UNAUTHORIZED, "Unauthorized").await;
    }

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/cases", Some("not-a-token")))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn login_then_profile() {
    let app = test_app().await;

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "ADMINISTRADOR");
    let token = body["token"]["token"].as_str().unwrap().to_string();

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["user"]["username"], ADMIN_USERNAME);
    assert!(
        profile["capabilities"]
            .as_array()
            .unwrap()
            .iter()
            .any(|cap| cap["resource"] == "audit" && cap["action"] == "read")
    );

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "username": ADMIN_USERNAME, "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn readers_can_list_but_not_write() {
    let app = test_app().await;
    let reader = app.user_with_role("lectora", Role::Reader).await;
    let token = app.token_for(&reader).await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/cases", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases",
            Some(&token),
            case_body("1/0126", "Plaza"),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::FORBIDDEN, "Forbidden").await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/audit-logs", Some(&token)))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn case_lifecycle_over_http() {
    let app = test_app().await;
    let capture = app.user_with_role("captura", Role::Capture).await;
    let token = app.token_for(&capture).await;

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases",
            Some(&token),
            case_body("35 / 0126", "Plaza Central"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["case"]["code"], "0035/0126/DPCJM");
    assert_eq!(created["checklist"][0]["status"], "presenta");
    assert_eq!(created["checklist"][10]["status"], "no_presenta");
    let id = created["case"]["id"].as_i64().unwrap();

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases",
            Some(&token),
            case_body("0035/0126/DPCJM", "Duplicado"),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::CONFLICT, "Conflict").await;

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases",
            Some(&token),
            case_body("AB/0126", "Plaza"),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::BAD_REQUEST, "Bad Request").await;

    let response = app
        .router()
        .oneshot(empty_request(
            "POST",
            &format!("/api/v1/cases/{id}/visits/increment"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["visit_count"], 1);

    let response = app
        .router()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/cases/{id}"),
            Some(&token),
            case_body("35/0126", "Plaza Poniente"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["case"]["property_name"], "Plaza Poniente");

    let response = app
        .router()
        .oneshot(empty_request(
            "GET",
            &format!("/api/v1/cases/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["case"]["visit_count"], 1);

    let response = app
        .router()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/v1/cases/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "deleted");

    let response = app
        .router()
        .oneshot(empty_request(
            "GET",
            &format!("/api/v1/cases/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn pdf_and_archive_downloads() {
    let app = test_app().await;
    let id = app.create_case("42/0126", "Plaza").await.case.id;
    let reader = app.user_with_role("lectora", Role::Reader).await;
    let token = app.token_for(&reader).await;

    let response = app
        .router()
        .oneshot(empty_request(
            "GET",
            &format!("/api/v1/cases/{id}/pdf"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("0042-0126-DPCJM.pdf"), "{disposition}");
    assert!(body_bytes(response).await.starts_with(b"%PDF-"));

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases/export",
            Some(&token),
            json!({ "ids": [id, 12345] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    assert!(body_bytes(response).await.starts_with(b"PK"));

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/cases/export",
            Some(&token),
            json!({ "ids": [] }),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn admin_manages_users_but_not_itself() {
    let app = test_app().await;
    let token = app.token_for(&app.admin).await;

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            Some(&token),
            json!({ "username": "Maria", "password": "secreta", "role": "CAPTURA" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["username"], "maria");
    assert_eq!(user["is_active"], true);

    let response = app
        .router()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/v1/users/{}", app.admin.id.0),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_error_response(response, StatusCode::FORBIDDEN, "Forbidden").await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .router()
        .oneshot(empty_request(
            "GET",
            "/api/v1/audit-logs?entity=users&limit=5",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entries = body_json(response).await;
    assert_eq!(entries[0]["entity"], "users");
    assert_eq!(entries[0]["action"], "CREATE");
}

#[tokio::test]
async fn checklist_catalog_is_served_in_order() {
    let app = test_app().await;
    let token = app.token_for(&app.admin).await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/api/v1/checklist-items", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items = body_json(response).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 11);
    assert_eq!(items[0]["label"], "SOLICITUD");
    assert_eq!(items[10]["label"], "TRANSPARENCIA");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app().await;

    let response = app
        .router()
        .oneshot(empty_request("GET", "/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/v1/cases/{id}/pdf"].is_object());
}
