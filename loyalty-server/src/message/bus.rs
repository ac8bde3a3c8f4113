//! 消息总线核心实现
//!
//! # 消息流
//!
//! ```text
//! Handler ──▶ broadcast_sync() ──▶ publish() ──▶ server_tx ──▶ Subscribers
//! ```
//!
//! 订阅端（进程内客户端或挂接的传输层）通过 [`MessageBus::subscribe`]
//! 获取接收器，按 [`shared::sync::SyncMirror`] 的方式合并变更。

use shared::message::BusMessage;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::utils::AppError;

/// Default capacity of the broadcast channel
const DEFAULT_CAPACITY: usize = 1024;

/// 消息总线 - 服务器到订阅者的广播通道
#[derive(Debug, Clone)]
pub struct MessageBus {
    /// 服务器到订阅者的广播通道
    server_tx: broadcast::Sender<BusMessage>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl MessageBus {
    /// 创建默认容量的消息总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (server_tx, _) = broadcast::channel(capacity);
        Self {
            server_tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 发布消息 (服务器 -> 所有订阅者)
    ///
    /// 没有订阅者时返回错误；调用方视广播为 best-effort 并自行忽略。
    pub fn publish(&self, msg: BusMessage) -> Result<usize, AppError> {
        self.server_tx
            .send(msg)
            .map_err(|e| AppError::internal(e.to_string()))
    }

    /// 订阅服务器广播
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.server_tx.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.server_tx.receiver_count()
    }

    /// 获取关闭令牌 (用于传输层监控关闭信号)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 优雅关闭消息总线
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
