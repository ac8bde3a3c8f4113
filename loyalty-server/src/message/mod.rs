//! Message Module
//!
//! In-process change-feed bus. Every persisted mutation is published here
//! as a [`shared::message::SyncPayload`]; a wire transport for remote
//! clients would subscribe at this seam.

pub mod bus;

pub use bus::MessageBus;
pub use shared::message::{BusMessage, EventType, SyncPayload};
