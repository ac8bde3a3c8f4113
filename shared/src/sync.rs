//! Local mirror of remote state
//!
//! Clients keep an in-memory copy of server resources and feed every
//! change through [`SyncMirror::apply`] — the same path for pushed
//! change-feed events and for echoes of the client's own writes. Nothing
//! else mutates the mirror, so local and remote views stay reconcilable.

use std::collections::HashMap;

use crate::message::SyncPayload;

/// Version gap beyond which incremental application is abandoned and the
/// client should reload the resource wholesale.
pub const MAX_VERSION_GAP: u64 = 5;

/// Outcome of applying one sync payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Event merged into the mirror
    Applied,
    /// Event version not newer than the mirror's; ignored
    Stale,
    /// Version gap too large; caller must reload this resource
    RefreshNeeded,
}

/// In-memory cache keyed by (resource, id), driven only by sync events.
#[derive(Debug, Default)]
pub struct SyncMirror {
    tables: HashMap<String, HashMap<String, serde_json::Value>>,
    versions: HashMap<String, u64>,
}

impl SyncMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a change-feed event by primary-key upsert/removal.
    pub fn apply(&mut self, event: &SyncPayload) -> ApplyOutcome {
        let current = self.versions.get(&event.resource).copied().unwrap_or(0);

        if event.version <= current {
            return ApplyOutcome::Stale;
        }
        if event.version - current > MAX_VERSION_GAP {
            return ApplyOutcome::RefreshNeeded;
        }

        let table = self.tables.entry(event.resource.clone()).or_default();
        match event.action.as_str() {
            "created" | "updated" => {
                if let Some(data) = &event.data {
                    table.insert(event.id.clone(), data.clone());
                }
            }
            "deleted" => {
                table.remove(&event.id);
            }
            _ => return ApplyOutcome::Stale,
        }

        self.versions.insert(event.resource.clone(), event.version);
        ApplyOutcome::Applied
    }

    /// Replace a resource table wholesale after a full reload.
    pub fn reload(
        &mut self,
        resource: &str,
        version: u64,
        rows: HashMap<String, serde_json::Value>,
    ) {
        self.tables.insert(resource.to_string(), rows);
        self.versions.insert(resource.to_string(), version);
    }

    pub fn get(&self, resource: &str, id: &str) -> Option<&serde_json::Value> {
        self.tables.get(resource)?.get(id)
    }

    pub fn len(&self, resource: &str) -> usize {
        self.tables.get(resource).map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, resource: &str) -> bool {
        self.len(resource) == 0
    }

    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource).copied().unwrap_or(0)
    }
}
