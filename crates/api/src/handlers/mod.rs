//! Request handlers.
//!
//! Handlers parse identifiers at the HTTP boundary and delegate to
//! [`GoodService`](crate::services::GoodService); errors map to responses
//! via [`AppError`](crate::error::AppError).

pub mod good;
