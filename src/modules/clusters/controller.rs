//! Server-rendered cluster management.
//!
//! Unlike the JSON API, this surface soft-fails: an unknown cluster id
//! redirects back to the index with a warning flash instead of returning
//! a 404. Flash messages travel as query parameters on the redirect
//! target.

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::modules::clusters::model::{ClusterForm, FlashParams};
use crate::modules::clusters::service::ClusterService;
use crate::modules::clusters::view;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Builds a redirect target carrying a flash message in the query string.
fn flash_url(base: &str, kind: &str, message: &str) -> String {
    format!("{}?{}={}", base, kind, message.replace(' ', "%20"))
}

fn joined_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct IndexParams {
    #[serde(flatten)]
    pub flash: FlashParams,
    #[serde(
        default,
        deserialize_with = "crate::utils::pagination::deserialize_optional_i64"
    )]
    pub page: Option<i64>,
}

#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<Response, AppError> {
    let (clusters, meta) =
        ClusterService::get_clusters(&state.db, params.page.unwrap_or(1)).await?;

    Ok(Html(view::index_page(&clusters, &meta, &params.flash)).into_response())
}

#[instrument]
pub async fn create(Query(flash): Query<FlashParams>) -> Response {
    Html(view::create_page(&flash)).into_response()
}

#[instrument(skip(state, form))]
pub async fn store(
    State(state): State<AppState>,
    Form(form): Form<ClusterForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(
            Redirect::to(&flash_url("/clusters/new", "error", &joined_errors(&errors)))
                .into_response(),
        );
    }

    match ClusterService::create_cluster(&state.db, form).await {
        Ok(_) => Ok(Redirect::to(&flash_url(
            "/clusters",
            "success",
            "Cluster created successfully",
        ))
        .into_response()),
        Err(err) if err.status.is_client_error() => Ok(Redirect::to(&flash_url(
            "/clusters/new",
            "error",
            &err.error.to_string(),
        ))
        .into_response()),
        Err(err) => Err(err),
    }
}

/// Detail view. An unknown or malformed id redirects to the index with a
/// warning rather than erroring.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(
            Redirect::to(&flash_url("/clusters", "warning", "Cluster not found")).into_response(),
        );
    };

    match ClusterService::find_cluster(&state.db, id).await? {
        Some(cluster) => {
            let units = ClusterService::units_for(&state.db, &cluster).await?;
            Ok(Html(view::show_page(&cluster, &units, &flash)).into_response())
        }
        None => Ok(
            Redirect::to(&flash_url("/clusters", "warning", "Cluster not found")).into_response(),
        ),
    }
}

#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(
            Redirect::to(&flash_url("/clusters", "warning", "Cluster not found")).into_response(),
        );
    };

    match ClusterService::find_cluster(&state.db, id).await? {
        Some(cluster) => Ok(Html(view::edit_page(&cluster, &flash)).into_response()),
        None => Ok(
            Redirect::to(&flash_url("/clusters", "warning", "Cluster not found")).into_response(),
        ),
    }
}

#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ClusterForm>,
) -> Result<Response, AppError> {
    let edit_url = format!("/clusters/{id}/edit");

    if let Err(errors) = form.validate() {
        return Ok(
            Redirect::to(&flash_url(&edit_url, "error", &joined_errors(&errors))).into_response(),
        );
    }

    match ClusterService::update_cluster(&state.db, id, form).await {
        Ok(_) => Ok(Redirect::to(&flash_url(
            "/clusters",
            "success",
            "Cluster updated successfully",
        ))
        .into_response()),
        Err(err) if err.status == axum::http::StatusCode::NOT_FOUND => Ok(Redirect::to(
            &flash_url("/clusters", "warning", "Cluster not found"),
        )
        .into_response()),
        Err(err) if err.status.is_client_error() => Ok(Redirect::to(&flash_url(
            &edit_url,
            "error",
            &err.error.to_string(),
        ))
        .into_response()),
        Err(err) => Err(err),
    }
}

#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if ClusterService::delete_cluster(&state.db, id).await? {
        Ok(Redirect::to(&flash_url(
            "/clusters",
            "success",
            "Cluster deleted successfully",
        ))
        .into_response())
    } else {
        Ok(Redirect::to(&flash_url("/clusters", "warning", "Cluster not found")).into_response())
    }
}
