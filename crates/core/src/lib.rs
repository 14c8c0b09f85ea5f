//! Domain types shared by the store, the cache and the HTTP layer.
//!
//! Nothing in this crate touches the network: the `Good` entity and its
//! request DTOs, the composite cache key, pagination checks and the
//! domain error type.

pub mod cache_key;
pub mod error;
pub mod good;
pub mod pagination;
pub mod types;
