use crate::{DEFAULT_HISTORY_DAYS, DEFAULT_PER_PAGE};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coinwatch", about = "Rate-limited, cache-backed crypto market data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List coins by market cap
    Coins {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
    /// Global market statistics
    Global,
    /// Details for one coin
    Coin {
        /// Coin id (e.g. bitcoin)
        id: String,
    },
    /// Price history for one coin
    History {
        /// Coin id (e.g. bitcoin)
        coin_id: String,
        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: u32,
    },
    /// Trending coins
    Trending,
    /// Search coins by name, symbol or id
    Search {
        query: String,
        /// Print the unfiltered upstream response
        #[arg(long)]
        raw: bool,
    },
    /// Market-cap share of the top coins with small caps grouped as "Others"
    Pie,
    /// Load every dashboard section, tolerating partial failures
    Dashboard {
        #[arg(long, default_value = "20")]
        per_page: u32,
        /// Coin whose history is loaded
        #[arg(long, default_value = "bitcoin")]
        coin: String,
        #[arg(long, default_value = "7")]
        days: u32,
    },
}
