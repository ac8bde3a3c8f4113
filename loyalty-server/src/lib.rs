//! Loyalty Server - 소상공인 포인트 적립 서비스 서버
//!
//! # 架构概述
//!
//! - **账户生命周期** (`accounts`): 가입 / 승인 / 로그인 / 탈퇴 / 복구 / 삭제
//! - **积分账本** (`points`): 적립 / 차감 / 내역, 캐시 잔액과 원장 동기화
//! - **通知分发** (`notify`): 고객 알림, 브로드캐스트, 관리자 알림
//! - **消息总线** (`message`): 进程内变更广播 (change feed)
//! - **数据库** (`db`): SQLite + sqlx 仓储层
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! loyalty-server/src/
//! ├── core/       # 配置、状态、服务器
//! ├── accounts/   # 账户生命周期
//! ├── points/     # 积分账本
//! ├── notify/     # 通知分发
//! ├── api/        # HTTP 路由和处理器
//! ├── db/         # 数据库层
//! ├── message/    # 消息总线
//! └── utils/      # 错误、日志、校验
//! ```

pub mod accounts;
pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod notify;
pub mod points;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::db::DbService;
pub use crate::message::{BusMessage, EventType, MessageBus};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __                     ____
   / /   ____  __  _______/ / /___  __
  / /   / __ \/ / / / __ `/ / __/ / / /
 / /___/ /_/ / /_/ / /_/ / / /_/ /_/ /
/_____/\____/\__, /\__,_/_/\__/\__, /
            /____/            /____/
    "#
    );
}
