use crate::modules::clusters::controller::{create, destroy, edit, index, show, store, update};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// HTML forms cannot issue PUT/DELETE, so update and delete are POST
/// routes, matching what the form markup submits.
pub fn init_clusters_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/new", get(create))
        .route("/{id}", get(show).post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(destroy))
}
