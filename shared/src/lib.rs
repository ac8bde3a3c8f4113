//! Shared types for the loyalty point platform
//!
//! Domain models, message bus payloads and small utilities used by both
//! the server and any connected client.

pub mod message;
pub mod models;
pub mod phone;
pub mod sync;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Message bus re-exports (for convenient access)
pub use message::{BusMessage, EventType, SyncPayload};
