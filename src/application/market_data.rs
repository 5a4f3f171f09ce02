use crate::application::resolver::{CachedResolver, Fetched};
use crate::application::scheduler::RequestScheduler;
use crate::domain::entities::coin::{
    CoinDetail, CoinMarket, GlobalStats, MarketChart, SearchResponse, Trending,
};
use crate::domain::error::DomainError;
use crate::domain::values::cache_key::CacheKey;
use crate::domain::values::request_options::RequestOptions;
use serde_json::json;
use std::sync::Arc;

/// The cached upstream operations. Each one is a single `resolve` around a
/// single scheduled HTTP call.
pub struct MarketDataUseCase {
    resolver: CachedResolver,
    scheduler: Arc<RequestScheduler>,
    base_url: String,
}

impl MarketDataUseCase {
    pub fn new(resolver: CachedResolver, scheduler: Arc<RequestScheduler>, base_url: &str) -> Self {
        Self {
            resolver,
            scheduler,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn resolver(&self) -> &CachedResolver {
        &self.resolver
    }

    pub fn coins_key(page: u32, per_page: u32) -> CacheKey {
        CacheKey::new("coins", json!({ "page": page, "perPage": per_page }))
    }

    pub fn global_key() -> CacheKey {
        CacheKey::bare("global")
    }

    pub fn coin_key(id: &str) -> CacheKey {
        CacheKey::new("coinById", json!({ "id": id }))
    }

    pub fn history_key(coin_id: &str, days: u32) -> CacheKey {
        CacheKey::new("history", json!({ "coinId": coin_id, "days": days }))
    }

    pub fn trending_key() -> CacheKey {
        CacheKey::bare("trending")
    }

    pub fn search_key(term: &str) -> CacheKey {
        CacheKey::new("search", json!({ "searchTerm": term }))
    }

    pub async fn coins(
        &self,
        page: u32,
        per_page: u32,
        enable_fallback: bool,
    ) -> Result<Fetched<Vec<CoinMarket>>, DomainError> {
        if page == 0 || per_page == 0 {
            return Err(DomainError::InvalidInput(format!(
                "page and per_page must be positive (got {page}, {per_page})"
            )));
        }
        let url = format!("{}/coins/markets", self.base_url);
        let options = RequestOptions::new()
            .param("vs_currency", "usd")
            .param("order", "market_cap_desc")
            .param("per_page", per_page)
            .param("page", page)
            .param("sparkline", true)
            .param("price_change_percentage", "1h,24h,7d");
        self.fetch(&Self::coins_key(page, per_page), url, options, enable_fallback)
            .await
    }

    pub async fn global_stats(&self, enable_fallback: bool) -> Result<Fetched<GlobalStats>, DomainError> {
        let url = format!("{}/global", self.base_url);
        self.fetch(&Self::global_key(), url, RequestOptions::new(), enable_fallback)
            .await
    }

    pub async fn coin_by_id(&self, id: &str, enable_fallback: bool) -> Result<Fetched<CoinDetail>, DomainError> {
        validate_coin_id(id)?;
        let url = format!("{}/coins/{id}", self.base_url);
        let options = RequestOptions::new()
            .param("localization", false)
            .param("tickers", false)
            .param("market_data", true)
            .param("community_data", false)
            .param("developer_data", false)
            .param("sparkline", true);
        self.fetch(&Self::coin_key(id), url, options, enable_fallback).await
    }

    pub async fn coin_history(
        &self,
        coin_id: &str,
        days: u32,
        enable_fallback: bool,
    ) -> Result<Fetched<MarketChart>, DomainError> {
        validate_coin_id(coin_id)?;
        let url = format!("{}/coins/{coin_id}/market_chart", self.base_url);
        let options = RequestOptions::new()
            .param("vs_currency", "usd")
            .param("days", days);
        self.fetch(&Self::history_key(coin_id, days), url, options, enable_fallback)
            .await
    }

    pub async fn trending(&self, enable_fallback: bool) -> Result<Fetched<Trending>, DomainError> {
        let url = format!("{}/search/trending", self.base_url);
        self.fetch(&Self::trending_key(), url, RequestOptions::new(), enable_fallback)
            .await
    }

    /// Cached search keyed by the already-normalized term.
    pub async fn search(&self, term: &str, enable_fallback: bool) -> Result<Fetched<SearchResponse>, DomainError> {
        let url = format!("{}/search", self.base_url);
        let options = RequestOptions::new().param("query", term);
        self.fetch(&Self::search_key(term), url, options, enable_fallback)
            .await
    }

    /// Uncached search passthrough.
    pub async fn search_uncached(&self, query: &str) -> Result<SearchResponse, DomainError> {
        let url = format!("{}/search", self.base_url);
        let options = RequestOptions::new().param("query", query);
        let raw = self.scheduler.enqueue(url, options).await?;
        Ok(serde_json::from_value(raw)?)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
        url: String,
        options: RequestOptions,
        enable_fallback: bool,
    ) -> Result<Fetched<T>, DomainError> {
        self.resolver
            .resolve(key, || self.scheduler.enqueue(url, options), enable_fallback)
            .await
    }
}

fn validate_coin_id(id: &str) -> Result<(), DomainError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("Invalid coin id: {id:?}")))
    }
}
