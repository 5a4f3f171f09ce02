pub mod cache_store;
pub mod clock;
pub mod http_transport;
