pub mod catalog;
pub mod config;
pub mod error;
pub mod rewards;
pub mod stores;
pub mod telemetry;
pub mod wallet;
