use crate::application::aggregation::build_pie_chart;
use crate::application::market_data::MarketDataUseCase;
use crate::application::resolver::Fetched;
use crate::domain::entities::dashboard::{
    DashboardError, DashboardLoadResult, SubFetch, CRITICAL_ERROR_TYPE,
};
use crate::domain::error::DomainError;
use crate::domain::values::cache_key::CacheKey;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub coins_page: u32,
    pub coins_per_page: u32,
    /// How many top coins feed the pie chart.
    pub pie_sample: u32,
    pub history_coin: String,
    pub history_days: u32,
    /// Pause between waves.
    pub wave_pause: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            coins_page: 1,
            coins_per_page: 20,
            pie_sample: crate::PIE_CHART_SAMPLE,
            history_coin: "bitcoin".into(),
            history_days: 7,
            wave_pause: Duration::from_millis(50),
        }
    }
}

/// Bulk load for the dashboard in three waves: global stats; then pie
/// chart and coins together; then trending and history together. A wave
/// starts only after the previous one has settled.
///
/// Sub-fetches never abort the load. A failed part is retried from the
/// fallback tier under its own key; if that misses too, the part stays
/// empty and an error entry is recorded.
pub struct DashboardUseCase {
    market: Arc<MarketDataUseCase>,
}

impl DashboardUseCase {
    pub fn new(market: Arc<MarketDataUseCase>) -> Self {
        Self { market }
    }

    pub async fn load(&self, options: &DashboardOptions) -> DashboardLoadResult {
        let mut result = DashboardLoadResult::default();
        if let Err(e) = self.load_waves(options, &mut result).await {
            tracing::error!(error = %e, "dashboard load aborted");
            result
                .errors
                .push(DashboardError::new(CRITICAL_ERROR_TYPE, e));
        }
        result
    }

    async fn load_waves(
        &self,
        options: &DashboardOptions,
        result: &mut DashboardLoadResult,
    ) -> Result<(), JoinError> {
        let global = self
            .spawn(|m| async move { m.global_stats(false).await })
            .await?;
        let global_key = MarketDataUseCase::global_key();
        let global = self.settle(result, SubFetch::GlobalStats, &global_key, global);
        result.global_stats = global;

        tokio::time::sleep(options.wave_pause).await;

        let (pie_page, pie_size) = (1, options.pie_sample);
        let (coins_page, coins_size) = (options.coins_page, options.coins_per_page);
        let pie = self.spawn(move |m| async move { m.coins(pie_page, pie_size, false).await });
        let coins = self.spawn(move |m| async move { m.coins(coins_page, coins_size, false).await });
        let (pie, coins) = tokio::join!(pie, coins);

        // Settle whichever side loaded before raising a panicked sibling.
        let pie_key = MarketDataUseCase::coins_key(pie_page, pie_size);
        let pie = pie.map(|outcome| self.settle(result, SubFetch::PieChart, &pie_key, outcome));
        let coins_key = MarketDataUseCase::coins_key(coins_page, coins_size);
        let mut coins = coins.map(|outcome| self.settle(result, SubFetch::Coins, &coins_key, outcome));
        if let Ok(Some(sample)) = &pie {
            result.pie_chart = build_pie_chart(sample);
        }
        if let Ok(loaded) = coins.as_mut() {
            result.coins = loaded.take().unwrap_or_default();
        }
        pie?;
        coins?;

        tokio::time::sleep(options.wave_pause).await;

        let history_coin = options.history_coin.clone();
        let history_days = options.history_days;
        let trending = self.spawn(|m| async move { m.trending(false).await });
        let historical = self.spawn(move |m| async move {
            m.coin_history(&history_coin, history_days, false).await
        });
        let (trending, historical) = tokio::join!(trending, historical);

        let trending_key = MarketDataUseCase::trending_key();
        let mut trending =
            trending.map(|outcome| self.settle(result, SubFetch::Trending, &trending_key, outcome));
        let history_key = MarketDataUseCase::history_key(&options.history_coin, history_days);
        let mut historical =
            historical.map(|outcome| self.settle(result, SubFetch::Historical, &history_key, outcome));
        if let Ok(loaded) = trending.as_mut() {
            result.trending = loaded.take().unwrap_or_default();
        }
        if let Ok(loaded) = historical.as_mut() {
            result.historical = loaded.take().unwrap_or_default();
        }
        trending?;
        historical?;

        Ok(())
    }

    /// Runs a sub-fetch as its own task so a panic in it surfaces as a
    /// `JoinError` instead of unwinding through the load.
    fn spawn<T, F, Fut>(&self, f: F) -> JoinHandle<Result<Fetched<T>, DomainError>>
    where
        T: Send + 'static,
        F: FnOnce(Arc<MarketDataUseCase>) -> Fut,
        Fut: Future<Output = Result<Fetched<T>, DomainError>> + Send + 'static,
    {
        tokio::spawn(f(self.market.clone()))
    }

    fn settle<T: DeserializeOwned>(
        &self,
        result: &mut DashboardLoadResult,
        part: SubFetch,
        key: &CacheKey,
        outcome: Result<Fetched<T>, DomainError>,
    ) -> Option<T> {
        let err = match outcome {
            Ok(fetched) => {
                if fetched.is_fallback {
                    result.fallbacks_used.push(part);
                }
                return Some(fetched.data);
            }
            Err(err) => err,
        };

        match self.market.resolver().fallback::<T>(key) {
            Some(data) => {
                tracing::warn!(part = %part, error = %err, "dashboard part served from fallback");
                result.fallbacks_used.push(part);
                Some(data)
            }
            None => {
                tracing::error!(part = %part, error = %err, "dashboard part unavailable");
                result.errors.push(DashboardError::new(part, &err));
                None
            }
        }
    }
}
