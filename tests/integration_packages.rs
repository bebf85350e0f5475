mod common;

use axum::http::StatusCode;
use common::{body_json, get_request, json_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_package_list_is_404_error_envelope(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get_request("/api/v1/packages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No packages found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_package_crud_roundtrip(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/packages",
            json!({
                "national_code": "ICT",
                "title": "Information and Communications Technology",
                "tga_status": "Current"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let package_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/packages/{package_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Package found");
    assert_eq!(body["data"]["national_code"], "ICT");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/packages/{package_id}"),
            json!({"national_code": "ICT", "title": "Updated title"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Updated title");
    assert!(body["data"]["tga_status"].is_null());

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/packages/{package_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_package_search(pool: PgPool) {
    let app = setup_test_app(pool);

    for (code, title) in [
        ("ICT", "Information Technology"),
        ("BSB", "Business Services"),
    ] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/packages",
                json!({"national_code": code, "title": title}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get_request("/api/v1/packages?search=Business"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["data"][0]["national_code"], "BSB");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_package_show_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(&format!("/api/v1/packages/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "No package found");
}
