//! Points API Handlers
//!
//! Every successful ledger mutation broadcasts the touched customers,
//! ledger entries and notifications on the change feed.

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Customer, PointHistory};

use crate::core::ServerState;
use crate::points::{self, LedgerOutcome};
use crate::utils::AppResult;

fn broadcast_outcome(state: &ServerState, outcome: &LedgerOutcome) {
    for c in &outcome.customers {
        state.broadcast_sync("customer", "updated", &c.id.to_string(), Some(c));
    }
    for e in &outcome.entries {
        state.broadcast_sync("point_history", "created", &e.id.to_string(), Some(e));
    }
    for n in &outcome.notifications {
        state.broadcast_sync("notification", "created", &n.id.to_string(), Some(n));
    }
}

#[derive(serde::Deserialize)]
pub struct EarnRequest {
    pub customer_ids: Vec<i64>,
    pub amount: i64,
}

/// POST /api/points/earn - 포인트 적립 (일괄)
pub async fn earn(
    State(state): State<ServerState>,
    Json(req): Json<EarnRequest>,
) -> AppResult<Json<LedgerOutcome>> {
    let outcome = points::earn(&state.pool, &req.customer_ids, req.amount).await?;
    broadcast_outcome(&state, &outcome);
    Ok(Json(outcome))
}

#[derive(serde::Deserialize)]
pub struct DeductRequest {
    pub customer_ids: Vec<i64>,
    pub amount: i64,
    pub reason: String,
}

/// POST /api/points/deduct - 포인트 차감 (일괄, 사유 필수)
pub async fn deduct(
    State(state): State<ServerState>,
    Json(req): Json<DeductRequest>,
) -> AppResult<Json<LedgerOutcome>> {
    let outcome = points::deduct(&state.pool, &req.customer_ids, req.amount, &req.reason).await?;
    broadcast_outcome(&state, &outcome);
    Ok(Json(outcome))
}

/// GET /api/points/history/:customer_id - 고객 포인트 내역 (최신순)
pub async fn history(
    State(state): State<ServerState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<Vec<PointHistory>>> {
    let entries = points::history(&state.pool, customer_id).await?;
    Ok(Json(entries))
}

/// DELETE /api/points/history/:id - 내역 삭제 (잔액 재계산)
pub async fn delete_entry(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = points::delete_entry(&state.pool, id).await?;
    state.broadcast_sync::<()>("point_history", "deleted", &id.to_string(), None);
    state.broadcast_sync("customer", "updated", &customer.id.to_string(), Some(&customer));
    Ok(Json(customer))
}
