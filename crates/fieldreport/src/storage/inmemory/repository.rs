//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fieldreport_core::report::{select_reports, SendStatus, WeatherReport};
use fieldreport_core::storage::{
    ensure_insertable, ReportQuery, ReportRepository, Result, StoreError,
};

#[derive(Debug)]
struct State {
    reports: Vec<WeatherReport>,
    next_id: i64,
}

impl State {
    fn assign(&mut self, report: &WeatherReport) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.reports.push(report.clone().with_id(id));
        id
    }
}

/// In-memory storage backend for testing.
///
/// IDs start at 1 and are never reused, like SQLite `AUTOINCREMENT`.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    state: Arc<RwLock<State>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                reports: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

#[async_trait]
impl ReportRepository for InMemoryRepository {
    async fn insert(&self, report: &WeatherReport) -> Result<i64> {
        ensure_insertable(report)?;
        let mut state = self.state.write().await;
        Ok(state.assign(report))
    }

    async fn insert_all(&self, reports: &[WeatherReport]) -> Result<Vec<i64>> {
        for report in reports {
            ensure_insertable(report)?;
        }
        let mut state = self.state.write().await;
        Ok(reports.iter().map(|report| state.assign(report)).collect())
    }

    async fn query(&self, query: ReportQuery) -> Result<Vec<WeatherReport>> {
        let state = self.state.read().await;
        Ok(select_reports(
            &state.reports,
            &query.filter,
            query.order,
            query.limit,
        ))
    }

    async fn update_send_status(&self, id: i64, status: SendStatus) -> Result<()> {
        let mut state = self.state.write().await;
        let report = state
            .reports
            .iter_mut()
            .find(|report| report.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        report.send_status = status;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let position = state
            .reports
            .iter()
            .position(|report| report.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        state.reports.remove(position);
        Ok(())
    }
}
