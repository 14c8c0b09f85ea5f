//! Row types mapped from the database.

pub mod good;
