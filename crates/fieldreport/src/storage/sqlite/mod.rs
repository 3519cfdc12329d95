//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of `ReportRepository`
//! using `rusqlite` for synchronous table operations and `tokio-rusqlite`
//! for async wrapping. `ReportTable` can also be used directly with a
//! caller-owned `rusqlite::Connection`.

mod conversions;
mod error;
mod repository;
mod schema;
mod table;

pub use repository::SqliteRepository;
pub use schema::{ColumnDef, COLUMNS, DEFAULT_TABLE_NAME};
pub use table::ReportTable;
