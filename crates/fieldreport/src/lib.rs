//! fieldreport - local weather-report store and its command-line client.

pub mod cli;
pub mod config;
pub mod output;
pub mod storage;

pub use config::Config;
pub use storage::{InMemoryRepository, ReportTable, SqliteRepository};
