use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub is_fallback: bool,
}

impl CacheEntry {
    pub fn new(data: serde_json::Value, timestamp: DateTime<Utc>, is_fallback: bool) -> Self {
        Self {
            data,
            timestamp,
            is_fallback,
        }
    }

    /// Age of the entry as seen at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.timestamp
    }

    pub fn is_within(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        self.age(now) < ttl
    }
}
