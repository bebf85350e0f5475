use crate::modules::roles::controller::get_user_roles;
use crate::modules::users::controller::{destroy, index, show, store, update};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", get(show).put(update).delete(destroy))
        .route("/{id}/roles", get(get_user_roles))
}
