use crate::modules::roles::controller::{assign_role, index, remove_role};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/assign", post(assign_role))
        .route("/remove", post(remove_role))
}
