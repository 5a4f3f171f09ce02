use crate::domain::error::DomainError;
use crate::domain::ports::cache_store::CacheStore;
use crate::domain::values::cache_key::CacheKey;
use crate::domain::values::cache_tier::CacheTier;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// A payload plus whether it came from the stale fallback tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fetched<T> {
    pub data: T,
    pub is_fallback: bool,
}

impl<T> Fetched<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            is_fallback: false,
        }
    }

    pub fn stale(data: T) -> Self {
        Self {
            data,
            is_fallback: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            is_fallback: self.is_fallback,
        }
    }
}

/// Cache-then-fetch-then-fallback over a [`CacheStore`].
pub struct CachedResolver {
    cache: Arc<dyn CacheStore>,
}

impl CachedResolver {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Serves a fresh hit without calling `fetch`. On a miss, `fetch` runs;
    /// a payload that decodes as `T` is written to both tiers. If the fetch
    /// or the decode fails and `enable_fallback` is set, a live fallback
    /// entry is served instead and the original error is dropped.
    pub async fn resolve<T, F, Fut>(
        &self,
        key: &CacheKey,
        fetch: F,
        enable_fallback: bool,
    ) -> Result<Fetched<T>, DomainError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<serde_json::Value, DomainError>>,
    {
        if let Some(entry) = self.cache.get(CacheTier::Fresh, key) {
            if let Ok(data) = serde_json::from_value(entry.data) {
                tracing::debug!(key = %key, is_fallback = entry.is_fallback, "cache hit");
                return Ok(Fetched {
                    data,
                    is_fallback: entry.is_fallback,
                });
            }
        }

        let outcome = fetch().await.and_then(|raw| {
            let data = serde_json::from_value::<T>(raw.clone())?;
            Ok((raw, data))
        });

        match outcome {
            Ok((raw, data)) => {
                self.cache.set(key, raw, false);
                Ok(Fetched::live(data))
            }
            Err(err) => {
                if enable_fallback {
                    if let Some(data) = self.fallback(key) {
                        tracing::warn!(key = %key, error = %err, "serving stale fallback data");
                        return Ok(Fetched::stale(data));
                    }
                }
                Err(err)
            }
        }
    }

    /// Reads the fallback tier. A hit is copied into the fresh tier marked
    /// as fallback, stamped now.
    pub fn fallback<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entry = self.cache.get(CacheTier::Fallback, key)?;
        let data = serde_json::from_value(entry.data.clone()).ok()?;
        self.cache.set(key, entry.data, true);
        Some(data)
    }
}
