//! Orchestration between the record store and the cache.

pub mod good;

pub use good::GoodService;
