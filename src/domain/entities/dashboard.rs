use super::coin::{CoinMarket, GlobalStats, MarketChart, Trending};
use super::pie_slice::PieSlice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independently fetched part of the dashboard bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubFetch {
    GlobalStats,
    Coins,
    PieChart,
    Trending,
    Historical,
}

impl fmt::Display for SubFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubFetch::GlobalStats => write!(f, "globalStats"),
            SubFetch::Coins => write!(f, "coins"),
            SubFetch::PieChart => write!(f, "pieChart"),
            SubFetch::Trending => write!(f, "trending"),
            SubFetch::Historical => write!(f, "historical"),
        }
    }
}

pub const CRITICAL_ERROR_TYPE: &str = "critical";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardError {
    #[serde(rename = "type")]
    pub kind: String,
    pub error: String,
}

impl DashboardError {
    pub fn new(kind: impl ToString, error: impl ToString) -> Self {
        Self {
            kind: kind.to_string(),
            error: error.to_string(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.kind == CRITICAL_ERROR_TYPE
    }
}

/// Everything the dashboard bulk load managed to gather. Failed parts hold
/// empty values and are listed in `errors`; parts served from the fallback
/// tier are listed in `fallbacks_used`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLoadResult {
    pub global_stats: Option<GlobalStats>,
    pub coins: Vec<CoinMarket>,
    pub trending: Trending,
    pub pie_chart: Vec<PieSlice>,
    pub historical: MarketChart,
    pub errors: Vec<DashboardError>,
    pub fallbacks_used: Vec<SubFetch>,
}

impl DashboardLoadResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when any part was served from stale fallback data.
    pub fn is_stale(&self) -> bool {
        !self.fallbacks_used.is_empty()
    }

    pub fn error_for(&self, part: SubFetch) -> Option<&DashboardError> {
        let kind = part.to_string();
        self.errors.iter().find(|e| e.kind == kind)
    }
}
