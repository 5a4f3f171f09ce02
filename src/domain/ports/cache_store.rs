use crate::domain::entities::cache_entry::CacheEntry;
use crate::domain::values::cache_key::CacheKey;
use crate::domain::values::cache_tier::CacheTier;

pub trait CacheStore: Send + Sync {
    /// Returns the entry only while it is younger than the tier's TTL.
    fn get(&self, tier: CacheTier, key: &CacheKey) -> Option<CacheEntry>;

    /// With `is_fallback = false` the payload lands in both tiers under one
    /// timestamp. With `is_fallback = true` only the fresh tier is written,
    /// marked stale; the fallback tier is never written from a failure path.
    fn set(&self, key: &CacheKey, data: serde_json::Value, is_fallback: bool);

    /// Drops entries past their tier's TTL. Returns how many were removed.
    fn sweep_expired(&self) -> usize;

    fn clear(&self, tier: CacheTier);

    fn len(&self, tier: CacheTier) -> usize;
}
