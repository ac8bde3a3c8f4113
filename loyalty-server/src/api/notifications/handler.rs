//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::Notification;

use crate::core::ServerState;
use crate::db::repository::notification;
use crate::notify::{self, BroadcastOutcome};
use crate::utils::AppResult;

const RESOURCE: &str = "notification";

/// GET /api/notifications/:customer_id - 고객 알림 목록 (최신순)
pub async fn list_for_customer(
    State(state): State<ServerState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<Vec<Notification>>> {
    let rows = notification::find_by_customer(&state.pool, customer_id).await?;
    Ok(Json(rows))
}

/// POST /api/notifications/read/:id - 단건 읽음 처리
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    notify::mark_read(&state.pool, id).await?;
    state.broadcast_sync::<()>(RESOURCE, "updated", &id.to_string(), None);
    Ok(Json(true))
}

#[derive(serde::Serialize)]
pub struct MarkAllReadResponse {
    pub marked: u64,
}

/// POST /api/notifications/:customer_id/read-all - 일괄 읽음 처리
/// (공지 타입 제외)
pub async fn mark_all_read(
    State(state): State<ServerState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let marked = notify::mark_all_read(&state.pool, customer_id).await?;
    if marked > 0 {
        state.broadcast_sync::<()>(RESOURCE, "updated", &customer_id.to_string(), None);
    }
    Ok(Json(MarkAllReadResponse { marked }))
}

/// DELETE /api/notifications/:id - 알림 삭제
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    notify::delete(&state.pool, id).await?;
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id.to_string(), None);
    Ok(Json(true))
}

#[derive(serde::Deserialize)]
pub struct BroadcastRequest {
    /// 없으면 전체 활성 고객에게 발송
    pub customer_ids: Option<Vec<i64>>,
    pub title: String,
    pub content: String,
}

/// POST /api/notifications/broadcast - 관리자 메시지 발송
pub async fn broadcast(
    State(state): State<ServerState>,
    Json(req): Json<BroadcastRequest>,
) -> AppResult<Json<BroadcastOutcome>> {
    let outcome = notify::broadcast(
        &state.pool,
        req.customer_ids.as_deref(),
        &req.title,
        &req.content,
    )
    .await?;
    for n in &outcome.notifications {
        state.broadcast_sync(RESOURCE, "created", &n.id.to_string(), Some(n));
    }
    Ok(Json(outcome))
}
