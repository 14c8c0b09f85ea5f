//! Repository layer: one function per SQL statement.

pub mod good_repo;

pub use good_repo::GoodRepo;
