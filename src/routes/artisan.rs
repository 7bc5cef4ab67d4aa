//! Artisan CRUD routes.

use crate::handlers::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn artisan_routes(state: AppState) -> Router {
    Router::new()
        .route("/artisans", get(list).post(create))
        .route(
            "/artisans/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
