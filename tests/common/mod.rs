use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use classtrack::config::cors::CorsConfig;
use classtrack::router::init_router;
use classtrack::state::AppState;
use classtrack::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Well-known role IDs (must match migration)
#[allow(dead_code)]
pub mod roles {
    use uuid::Uuid;
    pub const SUPER_ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);
    pub const STAFF: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000003);
    pub const STUDENT: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000004);
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

/// Creates a user directly in the store.
/// `role` is one of "super_admin", "admin", "staff", "student", or "" for
/// no role.
#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, role: &str, verified: bool) -> Uuid {
    let hashed = hash_password("Password1").unwrap();

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (given_name, family_name, preferred_name, pronouns, email, password, email_verified_at)
         VALUES ('Test', 'User', 'Test', 'they/them', $1, $2, CASE WHEN $3 THEN NOW() ELSE NULL END)
         RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(verified)
    .fetch_one(pool)
    .await
    .unwrap();

    let role_id = match role {
        "super_admin" => Some(roles::SUPER_ADMIN),
        "admin" => Some(roles::ADMIN),
        "staff" => Some(roles::STAFF),
        "student" => Some(roles::STUDENT),
        _ => None,
    };

    if let Some(role_id) = role_id {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role_id)
            .execute(pool)
            .await
            .unwrap();
    }

    user_id
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "Response body was not JSON: {:?}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
