//! Points API 모듈

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/points", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/earn", post(handler::earn))
        .route("/deduct", post(handler::deduct))
        // GET takes a customer id, DELETE a ledger entry id
        .route(
            "/history/{id}",
            get(handler::history).delete(handler::delete_entry),
        )
}
