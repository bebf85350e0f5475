use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::clusters::router::init_clusters_router;
use crate::modules::lessons::router::init_lessons_router;
use crate::modules::packages::router::init_packages_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::units::router::init_units_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/lessons", init_lessons_router())
                .nest("/users", init_users_router())
                .nest("/units", init_units_router())
                .nest("/packages", init_packages_router())
                .nest("/roles", init_roles_router()),
        )
        .nest("/clusters", init_clusters_router())
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
