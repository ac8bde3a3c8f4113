//! Announcement API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};

use crate::core::ServerState;
use crate::db::repository::announcement;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "announcement";

/// GET /api/announcements - 전체 공지 (관리자)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Announcement>>> {
    let rows = announcement::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/announcements/active - 노출 중인 공지 (고객)
///
/// is_active 이고 만료되지 않은 공지만, 고정 우선 + 최신순.
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<Announcement>>> {
    let rows = announcement::find_active(&state.pool, shared::util::now_millis()).await?;
    Ok(Json(rows))
}

/// POST /api/announcements - 공지 등록
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AnnouncementCreate>,
) -> AppResult<Json<Announcement>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_required_text(&payload.content, "content", MAX_NOTE_LEN)?;

    let created = announcement::create(&state.pool, payload).await?;
    state.broadcast_sync(RESOURCE, "created", &created.id.to_string(), Some(&created));
    Ok(Json(created))
}

/// PUT /api/announcements/:id - 공지 수정
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AnnouncementUpdate>,
) -> AppResult<Json<Announcement>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validate_optional_text(&payload.content, "content", MAX_NOTE_LEN)?;

    let updated = announcement::update(&state.pool, id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id.to_string(), Some(&updated));
    Ok(Json(updated))
}

/// DELETE /api/announcements/:id - 공지 삭제
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !announcement::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Announcement {id}")));
    }
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id.to_string(), None);
    Ok(Json(true))
}
