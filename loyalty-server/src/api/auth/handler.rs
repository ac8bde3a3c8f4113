//! Auth API Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use shared::models::{AdminNotificationSource, Customer, SignupRequest};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use crate::{accounts, notify};

const RESOURCE: &str = "customer";

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/signup - 고객 가입 신청
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<Customer>> {
    let customer = accounts::sign_up(&state.pool, payload).await?;
    let id = customer.id.to_string();

    // Dashboard alert; the signup itself is already persisted
    match notify::admin_alert(
        &state.pool,
        AdminNotificationSource::Signup,
        customer.id,
        "신규 가입 신청",
        &format!("{}님이 가입을 신청했습니다.", customer.name),
    )
    .await
    {
        Ok(alert) => {
            state.broadcast_sync("admin_notification", "created", &alert.id.to_string(), Some(&alert));
        }
        Err(e) => {
            tracing::warn!(customer_id = customer.id, error = %e, "Signup admin alert failed");
        }
    }

    state.broadcast_sync(RESOURCE, "created", &id, Some(&customer));
    Ok(Json(customer))
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// POST /api/auth/login - 고객 로그인
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Customer>> {
    // Fixed delay so response time does not reveal whether the phone exists
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let customer = accounts::login(&state.pool, &req.phone, &req.password).await?;
    tracing::info!(customer_id = customer.id, "Customer logged in");
    Ok(Json(customer))
}

#[derive(serde::Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct AdminLoginResponse {
    pub username: String,
}

/// POST /api/auth/admin-login - 관리자 로그인
pub async fn admin_login(
    State(state): State<ServerState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if req.username != state.config.admin_username || req.password != state.config.admin_password {
        tracing::warn!("Admin login failed");
        return Err(AppError::invalid_credentials());
    }

    tracing::info!("Admin logged in");
    Ok(Json(AdminLoginResponse {
        username: req.username,
    }))
}
