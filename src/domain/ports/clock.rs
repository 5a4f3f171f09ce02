use chrono::{DateTime, Utc};

/// Wall-clock source for cache timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
