//! Message bus payloads
//!
//! Messages flowing from the server to connected clients. The transport is
//! pluggable and out of scope here; these types only fix the envelope and
//! the change-feed payload shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 메시지 이벤트 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// 시스템 알림
    Notification = 1,
    /// 리소스 동기화 신호
    Sync = 4,
}

/// Change-feed payload broadcast after every persisted mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// 리소스 타입 (예: "customer", "notification", "announcement")
    pub resource: String,
    /// 버전 (클라이언트는 차이가 5를 넘으면 전체 새로고침)
    pub version: u64,
    /// 변경 종류 ("created", "updated", "deleted")
    pub action: String,
    /// 리소스 ID
    pub id: String,
    /// 리소스 데이터 (deleted 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Bus envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            payload,
        }
    }

    /// 동기화 메시지 생성
    pub fn sync(payload: &SyncPayload) -> Self {
        Self::new(
            EventType::Sync,
            serde_json::to_vec(payload).expect("Failed to serialize sync payload"),
        )
    }

    /// 페이로드를 지정한 타입으로 파싱
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
