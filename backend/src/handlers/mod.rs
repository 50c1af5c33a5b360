//! HTTP handlers

pub mod analysis;
pub mod auth;
pub mod farmer;
pub mod health;

pub use analysis::{analyze, calculate_economics};
pub use auth::{login, logout, register};
pub use farmer::get_current_farmer;
pub use health::health_check;
