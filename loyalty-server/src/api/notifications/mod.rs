//! Notification API 모듈

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notifications", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/broadcast", post(handler::broadcast))
        .route("/read/{id}", post(handler::mark_read))
        // GET lists a customer's notifications, DELETE removes one by id
        .route(
            "/{id}",
            get(handler::list_for_customer).delete(handler::delete),
        )
        .route("/{id}/read-all", post(handler::mark_all_read))
}
