pub mod cache_key;
pub mod cache_tier;
pub mod request_options;
pub mod retry_policy;
