use crate::modules::units::controller::{destroy, index, show, store, update};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_units_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", get(show).put(update).delete(destroy))
}
