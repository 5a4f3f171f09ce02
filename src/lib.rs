pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::aggregation::build_pie_chart;
use crate::application::dashboard::{DashboardOptions, DashboardUseCase};
use crate::application::market_data::MarketDataUseCase;
use crate::application::resolver::{CachedResolver, Fetched};
use crate::application::retry::RetryExecutor;
use crate::application::scheduler::RequestScheduler;
use crate::application::search::SearchUseCase;
use crate::config::{to_chrono, Settings};
use crate::domain::entities::coin::{
    CoinDetail, CoinMarket, GlobalStats, MarketChart, SearchResponse, SearchResults, Trending,
};
use crate::domain::entities::dashboard::DashboardLoadResult;
use crate::domain::entities::pie_slice::PieSlice;
use crate::domain::error::DomainError;
use crate::domain::ports::cache_store::CacheStore;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::http_transport::HttpTransport;
use crate::domain::values::cache_tier::CacheTier;
use crate::infrastructure::cache::memory_store::MemoryCacheStore;
use crate::infrastructure::clock::system_clock::SystemClock;
use crate::infrastructure::http::reqwest_transport::ReqwestTransport;
use std::sync::Arc;

pub use crate::application::aggregation::format_number;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_HISTORY_DAYS: u32 = 7;
pub const PIE_CHART_SAMPLE: u32 = 15;

/// Market-data access layer. Build one per process and share it by
/// reference; every outbound call goes through its single request queue.
pub struct CoinWatch {
    market_uc: Arc<MarketDataUseCase>,
    search_uc: SearchUseCase,
    dashboard_uc: DashboardUseCase,
    cache: Arc<dyn CacheStore>,
}

impl CoinWatch {
    /// Settings from the environment, live HTTP, system clock. Must be
    /// called within a Tokio runtime.
    pub fn new() -> Self {
        Self::with_settings(Settings::from_env())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let transport = Arc::new(ReqwestTransport::new(
            &settings.user_agent,
            settings.request_timeout,
        ));
        Self::with_providers(settings, transport, Arc::new(SystemClock))
    }

    pub fn with_providers(
        settings: Settings,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new(
            to_chrono(settings.fresh_ttl),
            to_chrono(settings.fallback_ttl),
            clock,
        ));
        let executor = RetryExecutor::new(transport, settings.retry, settings.min_interval);
        let scheduler = Arc::new(RequestScheduler::start(executor, settings.request_pause));
        let market_uc = Arc::new(MarketDataUseCase::new(
            CachedResolver::new(cache.clone()),
            scheduler,
            &settings.base_url,
        ));

        Self {
            search_uc: SearchUseCase::new(market_uc.clone()),
            dashboard_uc: DashboardUseCase::new(market_uc.clone()),
            market_uc,
            cache,
        }
    }

    pub async fn get_coins(&self, page: u32, per_page: u32) -> Result<Fetched<Vec<CoinMarket>>, DomainError> {
        self.market_uc.coins(page, per_page, true).await
    }

    pub async fn get_global_stats(&self) -> Result<Fetched<GlobalStats>, DomainError> {
        self.market_uc.global_stats(true).await
    }

    pub async fn get_coin_by_id(&self, id: &str) -> Result<Fetched<CoinDetail>, DomainError> {
        self.market_uc.coin_by_id(id, true).await
    }

    pub async fn get_coin_history(&self, coin_id: &str, days: u32) -> Result<Fetched<MarketChart>, DomainError> {
        self.market_uc.coin_history(coin_id, days, true).await
    }

    pub async fn get_trending_coins(&self) -> Result<Fetched<Trending>, DomainError> {
        self.market_uc.trending(true).await
    }

    pub async fn search_coins_intelligent(&self, query: &str) -> Result<SearchResults, DomainError> {
        self.search_uc.search_intelligent(query).await
    }

    pub async fn search_coins(&self, query: &str) -> Result<SearchResponse, DomainError> {
        self.search_uc.search(query).await
    }

    pub async fn get_top_coins_for_pie_chart(&self) -> Result<Fetched<Vec<PieSlice>>, DomainError> {
        let coins = self.market_uc.coins(1, PIE_CHART_SAMPLE, true).await?;
        Ok(coins.map(|c| build_pie_chart(&c)))
    }

    pub async fn load_dashboard_data(&self, options: &DashboardOptions) -> DashboardLoadResult {
        self.dashboard_uc.load(options).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear(CacheTier::Fresh);
        self.cache.clear(CacheTier::Fallback);
    }

    /// Returns how many entries were dropped.
    pub fn clean_expired_cache(&self) -> usize {
        self.cache.sweep_expired()
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }
}
