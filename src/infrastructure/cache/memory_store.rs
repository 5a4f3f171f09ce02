use crate::domain::entities::cache_entry::CacheEntry;
use crate::domain::ports::cache_store::CacheStore;
use crate::domain::ports::clock::Clock;
use crate::domain::values::cache_key::CacheKey;
use crate::domain::values::cache_tier::CacheTier;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Tier = Mutex<HashMap<CacheKey, CacheEntry>>;

/// Two in-process maps sharing one keyspace: a short-TTL fresh tier and a
/// long-TTL fallback tier. Nothing survives the process.
pub struct MemoryCacheStore {
    fresh: Tier,
    fallback: Tier,
    fresh_ttl: Duration,
    fallback_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryCacheStore {
    pub fn new(fresh_ttl: Duration, fallback_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            fresh: Mutex::new(HashMap::new()),
            fallback: Mutex::new(HashMap::new()),
            fresh_ttl,
            fallback_ttl,
            clock,
        }
    }

    fn tier(&self, tier: CacheTier) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        let map = match tier {
            CacheTier::Fresh => &self.fresh,
            CacheTier::Fallback => &self.fallback,
        };
        // A panic mid-insert cannot leave a HashMap half-written.
        map.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ttl(&self, tier: CacheTier) -> Duration {
        match tier {
            CacheTier::Fresh => self.fresh_ttl,
            CacheTier::Fallback => self.fallback_ttl,
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, tier: CacheTier, key: &CacheKey) -> Option<CacheEntry> {
        let now = self.clock.now();
        let ttl = self.ttl(tier);
        self.tier(tier)
            .get(key)
            .filter(|entry| entry.is_within(ttl, now))
            .cloned()
    }

    fn set(&self, key: &CacheKey, data: serde_json::Value, is_fallback: bool) {
        let now = self.clock.now();
        if !is_fallback {
            self.tier(CacheTier::Fallback)
                .insert(key.clone(), CacheEntry::new(data.clone(), now, false));
        }
        self.tier(CacheTier::Fresh)
            .insert(key.clone(), CacheEntry::new(data, now, is_fallback));
    }

    fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        for tier in [CacheTier::Fresh, CacheTier::Fallback] {
            let ttl = self.ttl(tier);
            let mut map = self.tier(tier);
            let before = map.len();
            map.retain(|_, entry| entry.is_within(ttl, now));
            removed += before - map.len();
        }
        if removed > 0 {
            tracing::debug!(removed, "swept expired cache entries");
        }
        removed
    }

    fn clear(&self, tier: CacheTier) {
        self.tier(tier).clear();
    }

    fn len(&self, tier: CacheTier) -> usize {
        self.tier(tier).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn store() -> (MemoryCacheStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock(Mutex::new(Utc::now())));
        let store = MemoryCacheStore::new(Duration::seconds(60), Duration::hours(24), clock.clone());
        (store, clock)
    }

    #[test]
    fn test_set_writes_both_tiers() {
        let (store, _) = store();
        let key = CacheKey::bare("global");
        store.set(&key, json!({"ok": true}), false);

        let fresh = store.get(CacheTier::Fresh, &key).unwrap();
        let fallback = store.get(CacheTier::Fallback, &key).unwrap();
        assert_eq!(fresh, fallback);
        assert!(!fresh.is_fallback);
    }

    #[test]
    fn test_fallback_set_only_touches_fresh() {
        let (store, _) = store();
        let key = CacheKey::bare("trending");
        store.set(&key, json!([1]), true);

        assert!(store.get(CacheTier::Fresh, &key).unwrap().is_fallback);
        assert!(store.get(CacheTier::Fallback, &key).is_none());
    }

    #[test]
    fn test_fresh_expires_before_fallback() {
        let (store, clock) = store();
        let key = CacheKey::bare("global");
        store.set(&key, json!(1), false);

        clock.advance(Duration::seconds(61));
        assert!(store.get(CacheTier::Fresh, &key).is_none());
        assert!(store.get(CacheTier::Fallback, &key).is_some());

        clock.advance(Duration::hours(24));
        assert!(store.get(CacheTier::Fallback, &key).is_none());
    }

    #[test]
    fn test_sweep_and_clear() {
        let (store, clock) = store();
        store.set(&CacheKey::bare("a"), json!(1), false);
        clock.advance(Duration::minutes(5));
        store.set(&CacheKey::bare("b"), json!(2), false);

        // "a" is gone from fresh only.
        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.len(CacheTier::Fresh), 1);
        assert_eq!(store.len(CacheTier::Fallback), 2);

        store.clear(CacheTier::Fallback);
        assert_eq!(store.len(CacheTier::Fallback), 0);
        assert_eq!(store.len(CacheTier::Fresh), 1);
    }
}
