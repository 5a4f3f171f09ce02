pub mod cache_entry;
pub mod coin;
pub mod dashboard;
pub mod pie_slice;
