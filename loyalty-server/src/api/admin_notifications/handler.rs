//! Admin Notification API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::AdminNotification;

use crate::core::ServerState;
use crate::db::repository::admin_notification;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "admin_notification";

/// GET /api/admin-notifications - 관리자 알림 목록 (최신순)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminNotification>>> {
    let rows = admin_notification::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// POST /api/admin-notifications/read/:id - 읽음 처리
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !admin_notification::mark_read(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Admin notification {id}")));
    }
    state.broadcast_sync::<()>(RESOURCE, "updated", &id.to_string(), None);
    Ok(Json(true))
}
