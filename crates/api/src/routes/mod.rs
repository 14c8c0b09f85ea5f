pub mod good;
pub mod health;
