//! SQLite repository implementation.
//!
//! Implements `ReportRepository` from `fieldreport_core::storage` by running
//! `ReportTable` operations on the `tokio-rusqlite` connection thread.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use fieldreport_core::report::{SendStatus, WeatherReport};
use fieldreport_core::storage::{ReportQuery, ReportRepository, Result};

use super::error::map_tokio_rusqlite_error;
use super::table::ReportTable;

/// SQLite-based report repository.
///
/// Owns its connection; the schema is created when the repository is opened.
pub struct SqliteRepository {
    conn: Connection,
    table: ReportTable,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    pub async fn new(path: &str, table: ReportTable) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "open"))?;

        tracing::info!(path, table = table.name(), "opened report database");
        Self::init(conn, table).await
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "open"))?;

        Self::init(conn, ReportTable::default()).await
    }

    async fn init(conn: Connection, table: ReportTable) -> Result<Self> {
        let repo = Self { conn, table };
        repo.run("create_schema", |conn, table| table.create_schema(conn))
            .await?;
        Ok(repo)
    }

    pub fn table(&self) -> &ReportTable {
        &self.table
    }

    /// Closes the connection, waiting for queued operations to finish.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "close"))
    }

    /// Runs a table operation on the connection thread.
    async fn run<F, T>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut rusqlite::Connection, &ReportTable) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let table = self.table.clone();
        self.conn
            .call(move |conn| Ok(f(conn, &table)))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, operation))?
    }
}

#[async_trait]
impl ReportRepository for SqliteRepository {
    async fn insert(&self, report: &WeatherReport) -> Result<i64> {
        let report = report.clone();
        self.run("insert", move |conn, table| table.insert(conn, &report))
            .await
    }

    async fn insert_all(&self, reports: &[WeatherReport]) -> Result<Vec<i64>> {
        let reports = reports.to_vec();
        self.run("insert_all", move |conn, table| {
            table.insert_all(conn, &reports)
        })
        .await
    }

    async fn query(&self, query: ReportQuery) -> Result<Vec<WeatherReport>> {
        self.run("query", move |conn, table| table.query(conn, &query))
            .await
    }

    async fn update_send_status(&self, id: i64, status: SendStatus) -> Result<()> {
        self.run("update_send_status", move |conn, table| {
            table.update_send_status(conn, id, status)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.run("delete", move |conn, table| table.delete(conn, id))
            .await
    }
}
