//! Storage backend implementations.
//!
//! Concrete implementations of `fieldreport_core::storage::ReportRepository`:
//!
//! - [`sqlite`]: persistent SQLite backend using `rusqlite` and `tokio-rusqlite`
//! - [`inmemory`]: non-persistent backend for tests and development

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryRepository;
pub use sqlite::{ReportTable, SqliteRepository};
