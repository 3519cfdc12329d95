//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of `ReportRepository`
//! that keeps reports in a `Vec` wrapped in `Arc<RwLock<_>>`. Filtering,
//! ordering and limits follow the SQLite backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldreport::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
