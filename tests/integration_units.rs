mod common;

use axum::http::StatusCode;
use common::{body_json, get_request, json_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_unit_list_is_404_error_envelope(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get_request("/api/v1/units")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No units found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_unit_normalizes_optionals_to_null(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/units",
            json!({"national_code": "ICTICT443"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Unit created");
    assert_eq!(body["data"]["national_code"], "ICTICT443");
    // Omitted optional fields come back as explicit nulls.
    assert!(body["data"]["title"].is_null());
    assert!(body["data"]["tga_status"].is_null());
    assert!(body["data"]["nominal_hours"].is_null());
    assert!(body["data"]["type"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unit_list_default_page_size_is_ten(pool: PgPool) {
    let app = setup_test_app(pool);

    for i in 0..12 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/units",
                json!({"national_code": format!("ICTICT4{i:02}")}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/units"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], "All units found");
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["meta"]["total"], 12);

    let response = app
        .oneshot(get_request("/api/v1/units?perPage=12"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 12);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unit_search(pool: PgPool) {
    let app = setup_test_app(pool);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/units",
            json!({"national_code": "ICTICT443", "title": "Work collaboratively"}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/units",
            json!({"national_code": "BSBCRT404", "title": "Critical thinking"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/api/v1/units?search=collaboratively"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["data"][0]["national_code"], "ICTICT443");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unit_full_replacement(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/units",
            json!({"national_code": "ICTICT443", "title": "Old title", "nominal_hours": 40}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let unit_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/units/{unit_id}"),
            json!({"national_code": "ICTICT443"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Unit updated");
    assert!(body["data"]["title"].is_null());
    assert!(body["data"]["nominal_hours"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_show_and_delete_unit_not_found(pool: PgPool) {
    let app = setup_test_app(pool);
    let missing = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/units/{missing}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No unit found");

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/units/{missing}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unit not found");
}
