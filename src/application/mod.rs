pub mod aggregation;
pub mod dashboard;
pub mod market_data;
pub mod resolver;
pub mod retry;
pub mod scheduler;
pub mod search;
