use std::sync::Arc;

use dashmap::DashMap;
use sqlx::SqlitePool;

use shared::message::{BusMessage, SyncPayload};

use crate::core::Config;
use crate::db::DbService;
use crate::message::MessageBus;
use crate::utils::AppError;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。每种资源类型维护独立的
/// 版本号，支持原子递增。broadcast_sync 据此为每条变更生成递增版本，
/// 客户端按版本号判断数据新旧（参见 `shared::sync::SyncMirror`）。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，Clone 成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | message_bus | 进程内变更广播总线 |
/// | resource_versions | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 消息总线
    pub message_bus: Arc<MessageBus>,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试场景常用)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let bus_capacity = config.bus_capacity;
        Self {
            config,
            pool,
            message_bus: Arc::new(MessageBus::with_capacity(bus_capacity)),
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 确保工作目录存在，打开数据库并应用迁移。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.pool))
    }

    /// 广播同步消息
    ///
    /// 向所有订阅者广播资源变更通知。版本号由 ResourceVersions 自动
    /// 递增管理。没有订阅者时静默丢弃。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "customer", "point_history")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        let _ = self.message_bus.publish(BusMessage::sync(&payload));
    }
}
