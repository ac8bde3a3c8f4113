//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{AdminNotificationSource, Customer, CustomerUpdate};

use crate::accounts::{self, ApprovalOutcome};
use crate::core::ServerState;
use crate::db::repository::customer::{self, CustomerCounts};
use crate::notify;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "customer";

/// GET /api/customers - 전체 고객 목록
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/customers/search?q=xxx - 이름 / 전화번호 / 회사 검색
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::search(&state.pool, &query.q).await?;
    Ok(Json(customers))
}

/// GET /api/customers/stats - 상태별 고객 수
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<CustomerCounts>> {
    let counts = customer::counts(&state.pool).await?;
    Ok(Json(counts))
}

/// GET /api/customers/:id - 단일 고객 조회
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let found = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    Ok(Json(found))
}

/// PUT /api/customers/:id - 고객 정보 수정 (관리자 편집 / 프로필 수정)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let updated = accounts::update_customer(&state.pool, id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id.to_string(), Some(&updated));
    Ok(Json(updated))
}

#[derive(serde::Deserialize)]
pub struct ApproveRequest {
    pub customer_ids: Vec<i64>,
}

/// POST /api/customers/approve - 가입 승인 (일괄)
pub async fn approve(
    State(state): State<ServerState>,
    Json(req): Json<ApproveRequest>,
) -> AppResult<Json<ApprovalOutcome>> {
    let outcome = accounts::approve_many(&state.pool, &req.customer_ids).await?;
    for c in &outcome.approved {
        state.broadcast_sync(RESOURCE, "updated", &c.id.to_string(), Some(c));
    }
    Ok(Json(outcome))
}

/// POST /api/customers/:id/withdraw - 탈퇴 처리
pub async fn withdraw(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let outcome = accounts::withdraw(&state.pool, id).await?;
    if outcome.changed {
        match notify::admin_alert(
            &state.pool,
            AdminNotificationSource::Withdrawal,
            id,
            "회원 탈퇴",
            &format!("{}님이 탈퇴했습니다.", outcome.customer.name),
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
                tracing::warn!(customer_id = id, error = %e, "Withdrawal admin alert failed");
            }
        }
        state.broadcast_sync(RESOURCE, "updated", &id.to_string(), Some(&outcome.customer));
    }
    Ok(Json(outcome.customer))
}

/// POST /api/customers/:id/restore - 탈퇴 복구
pub async fn restore(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let outcome = accounts::restore(&state.pool, id).await?;
    if outcome.changed {
        state.broadcast_sync(RESOURCE, "updated", &id.to_string(), Some(&outcome.customer));
    }
    Ok(Json(outcome.customer))
}

#[derive(serde::Deserialize)]
pub struct DeleteRequest {
    pub confirmed_name: String,
}

/// POST /api/customers/:id/delete - 영구 삭제 (이름 확인 필수)
pub async fn permanently_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<DeleteRequest>,
) -> AppResult<Json<bool>> {
    accounts::permanently_delete(&state.pool, id, &req.confirmed_name).await?;
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id.to_string(), None);
    Ok(Json(true))
}
