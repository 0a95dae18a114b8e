use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::storage::KeyValueStore;

#[derive(Debug, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Named values with an expiry, persisted through a `KeyValueStore`.
///
/// Expired entries read as absent. Reads never delete; an expired entry is
/// overwritten by the next `set` or dropped by `remove`.
#[derive(Clone)]
pub struct CookieJar {
    backend: Arc<dyn KeyValueStore>,
}

impl CookieJar {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.get_at(name, Utc::now())
    }

    fn get_at(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        let raw = self.backend.get(name)?;
        let cookie: StoredCookie = serde_json::from_str(&raw).ok()?;
        if cookie.expires_at <= now {
            return None;
        }
        Some(cookie.value)
    }

    /// Store `value` under `name`, expiring `ttl` from now.
    pub fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<()> {
        let cookie = StoredCookie {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        };
        self.backend.set(name, &serde_json::to_string(&cookie)?)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        self.backend.remove(name)
    }
}
