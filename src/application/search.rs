use crate::application::market_data::MarketDataUseCase;
use crate::domain::entities::coin::{SearchCoin, SearchResponse, SearchResults};
use crate::domain::error::DomainError;
use std::sync::Arc;

pub const MAX_RESULTS: usize = 10;
pub const SUGGESTION_COUNT: u32 = 10;

pub struct SearchUseCase {
    market: Arc<MarketDataUseCase>,
}

impl SearchUseCase {
    pub fn new(market: Arc<MarketDataUseCase>) -> Self {
        Self { market }
    }

    /// Upstream search narrowed locally to coins whose name, symbol or id
    /// contains the query (case-insensitive), capped at [`MAX_RESULTS`].
    /// When nothing matches, the top coins by market cap come back as
    /// suggestions instead.
    pub async fn search_intelligent(&self, query: &str) -> Result<SearchResults, DomainError> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Ok(SearchResults {
                query: query.to_string(),
                ..Default::default()
            });
        }

        let raw = self.market.search(&term, true).await?;
        let results = filter_matches(&raw.data.coins, &term);
        let suggestions = if results.is_empty() {
            self.top_suggestions().await
        } else {
            Vec::new()
        };

        Ok(SearchResults {
            results,
            suggestions,
            query: query.to_string(),
            is_fallback: raw.is_fallback,
        })
    }

    /// Raw upstream search, bypassing the cache.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, DomainError> {
        self.market.search_uncached(query).await
    }

    async fn top_suggestions(&self) -> Vec<SearchCoin> {
        match self.market.coins(1, SUGGESTION_COUNT, true).await {
            Ok(top) => top.data.iter().map(SearchCoin::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load search suggestions");
                Vec::new()
            }
        }
    }
}

/// `term` must already be trimmed and lowercased.
pub fn filter_matches(coins: &[SearchCoin], term: &str) -> Vec<SearchCoin> {
    coins
        .iter()
        .filter(|coin| {
            coin.name.to_lowercase().contains(term)
                || coin.symbol.to_lowercase().contains(term)
                || coin.id.to_lowercase().contains(term)
        })
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}
