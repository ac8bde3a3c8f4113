//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册 / 登录
//! - [`customers`] - 고객 관리 (승인, 탈퇴, 복구, 삭제)
//! - [`points`] - 포인트 적립 / 차감 / 내역
//! - [`notifications`] - 알림 및 브로드캐스트
//! - [`announcements`] - 공지사항
//! - [`inquiries`] - 고객 문의
//! - [`admin_notifications`] - 관리자 알림

pub mod admin_notifications;
pub mod announcements;
pub mod auth;
pub mod customers;
pub mod health;
pub mod inquiries;
pub mod notifications;
pub mod points;

use axum::Router;

use crate::core::ServerState;

/// 合并所有资源路由
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(customers::router())
        .merge(points::router())
        .merge(notifications::router())
        .merge(announcements::router())
        .merge(inquiries::router())
        .merge(admin_notifications::router())
}
