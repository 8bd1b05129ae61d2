//! In-flight request de-duplication.
//!
//! A second generate call with the same (plan key, channel, topic) while
//! one is running must be rejected, not started twice. Keys are held by an
//! RAII guard so a panicking or cancelled run still releases its slot.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Registry of currently running generation requests.
#[derive(Default, Clone)]
pub struct InflightRegistry {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim a key. Returns None when an identical request is
    /// already in flight.
    pub fn begin(
        &self,
        plan_key: &str,
        channel: &str,
        topic: &str,
    ) -> Option<InflightGuard> {
        let key = format!("{}::{}::{}", plan_key, channel, topic);
        let mut keys = self.keys.lock().unwrap();
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InflightGuard {
            registry: self.keys.clone(),
            key,
        })
    }

    /// Number of requests currently in flight.
    pub fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases the claimed key on drop.
pub struct InflightGuard {
    registry: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.registry.lock().unwrap().remove(&self.key);
    }
}
