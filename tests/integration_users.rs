mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_request, json_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn user_body(email: &str) -> serde_json::Value {
    json!({
        "given_name": "Dee",
        "family_name": "Mouser",
        "pronouns": "they/them",
        "email": email,
        "password": "Password1",
        "password_confirmation": "Password1",
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_user_list_is_404_error_envelope(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get_request("/api/v1/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No Users Found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_defaults_and_role(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            user_body("dee@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User created successfully");
    // preferred_name falls back to given_name.
    assert_eq!(body["data"]["preferred_name"], "Dee");
    // The response never carries the password hash.
    assert!(body["data"].get("password").is_none());

    let user_id = Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap();
    let role_names = sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM roles r
         INNER JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = $1",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(role_names, vec!["Student".to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_password_confirmation_mismatch(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut body = user_body("dee@example.com");
    body["password_confirmation"] = json!("Different1");

    let response = app
        .oneshot(json_request("POST", "/api/v1/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            user_body("dee@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            user_body("dee@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "The email has already been taken.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_search(pool: PgPool) {
    create_test_user(&pool, "john.smith@test.com", "student", true).await;
    create_test_user(&pool, "jane.doe@test.com", "student", true).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request("/api/v1/users?search=john.smith"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "All Users Found");
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["data"][0]["email"], "john.smith@test.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_show_user_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(&format!("/api/v1/users/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Specific User Not Found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_without_password_keeps_hash(pool: PgPool) {
    let user_id = create_test_user(&pool, "dee@example.com", "student", true).await;
    let before: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/{user_id}"),
            json!({
                "given_name": "Dee",
                "family_name": "Mouser",
                "preferred_name": "Mouse",
                "pronouns": "they/them",
                "email": "dee@example.com",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["preferred_name"], "Mouse");

    let after: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user(pool: PgPool) {
    let user_id = create_test_user(&pool, "dee@example.com", "student", true).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{user_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{user_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
