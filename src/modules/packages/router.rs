use crate::modules::packages::controller::{destroy, index, show, store, update};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_packages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", get(show).put(update).delete(destroy))
}
