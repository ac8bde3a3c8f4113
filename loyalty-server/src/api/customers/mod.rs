//! Customer API 모듈

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/search", get(handler::search))
        .route("/stats", get(handler::stats))
        .route("/approve", post(handler::approve))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/withdraw", post(handler::withdraw))
        .route("/{id}/restore", post(handler::restore))
        .route("/{id}/delete", post(handler::permanently_delete))
}
