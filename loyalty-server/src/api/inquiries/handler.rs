//! Inquiry API Handlers

use axum::{Json, extract::State};

use shared::models::{AdminNotificationSource, Inquiry, InquiryCreate};

use crate::core::ServerState;
use crate::db::repository::{customer, inquiry};
use crate::notify;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "inquiry";

/// GET /api/inquiries - 문의 목록 (관리자, 최신순)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Inquiry>>> {
    let rows = inquiry::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// POST /api/inquiries - 고객 문의 등록
///
/// 정보 변경 / 비밀번호 재설정 요청. 등록 시 관리자 알림으로 fan-out.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InquiryCreate>,
) -> AppResult<Json<Inquiry>> {
    validate_required_text(&payload.content, "content", MAX_NOTE_LEN)?;
    let requester = customer::find_by_id(&state.pool, payload.customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {}", payload.customer_id)))?;

    let kind_label = payload.kind.label();
    let created = inquiry::create(&state.pool, payload).await?;

    match notify::admin_alert(
        &state.pool,
        AdminNotificationSource::Inquiry,
        created.id,
        kind_label,
        &format!("{}님의 {}", requester.name, kind_label),
    )
    .await
    {
        Ok(alert) => {
            state.broadcast_sync(
                "admin_notification",
                "created",
                &alert.id.to_string(),
                Some(&alert),
            );
        }
        Err(e) => {
            tracing::warn!(inquiry_id = created.id, error = %e, "Inquiry admin alert failed");
        }
    }

    state.broadcast_sync(RESOURCE, "created", &created.id.to_string(), Some(&created));
    Ok(Json(created))
}
