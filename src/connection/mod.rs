//! Room connection seam
//!
//! The transport layer is external. The intake core only needs to tag the
//! local participant with attributes, e.g. which agent is speaking.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

/// Live connection to the conversation room
#[async_trait]
pub trait RoomConnection: Send + Sync {
    /// Set attributes on the local participant
    async fn set_attributes(&self, attributes: HashMap<String, String>) -> Result<()>;
}

/// Connection that accepts and discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopConnection;

#[async_trait]
impl RoomConnection for NoopConnection {
    async fn set_attributes(&self, _attributes: HashMap<String, String>) -> Result<()> {
        Ok(())
    }
}

/// Connection that records every attribute update
///
/// With `failing()` every update is recorded and then rejected.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    updates: Mutex<Vec<HashMap<String, String>>>,
    fail: bool,
}

impl RecordingConnection {
    /// Create an accepting recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that rejects updates
    pub fn failing() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All updates received so far
    pub fn updates(&self) -> Vec<HashMap<String, String>> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }

    /// Values seen for one attribute key, in order
    pub fn values_for(&self, key: &str) -> Vec<String> {
        self.updates()
            .iter()
            .filter_map(|update| update.get(key).cloned())
            .collect()
    }
}

#[async_trait]
impl RoomConnection for RecordingConnection {
    async fn set_attributes(&self, attributes: HashMap<String, String>) -> Result<()> {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(attributes);
        }
        if self.fail {
            anyhow::bail!("participant attributes rejected");
        }
        Ok(())
    }
}
