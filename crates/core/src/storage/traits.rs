use async_trait::async_trait;

use crate::report::{SendStatus, WeatherReport};

use super::{OrderBy, ReportFilter, ReportQuery, Result};

/// Repository for weather reports.
///
/// Backends implement the primitive operations; the status- and
/// incident-scoped lookups are provided on top of [`query`](Self::query).
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts a new report and returns its assigned ID.
    ///
    /// The report's `id` must be unset.
    async fn insert(&self, report: &WeatherReport) -> Result<i64>;

    /// Inserts several reports atomically, returning their IDs in input order.
    async fn insert_all(&self, reports: &[WeatherReport]) -> Result<Vec<i64>>;

    /// Runs a filtered, ordered, limited query.
    ///
    /// Records are returned in store order, fully hydrated.
    async fn query(&self, query: ReportQuery) -> Result<Vec<WeatherReport>>;

    /// Changes the send status of an existing report.
    async fn update_send_status(&self, id: i64, status: SendStatus) -> Result<()>;

    /// Deletes a report by its ID.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Reports for an incident that are waiting to be sent, newest first.
    async fn ready_to_send(&self, incident_id: i64) -> Result<Vec<WeatherReport>> {
        self.query(ReportQuery::new(
            ReportFilter::by_status(SendStatus::WaitingToSend).with_incident(incident_id),
        ))
        .await
    }

    /// All reports waiting to be sent, in the given order.
    async fn all_ready_to_send(&self, order: OrderBy) -> Result<Vec<WeatherReport>> {
        self.query(
            ReportQuery::new(ReportFilter::by_status(SendStatus::WaitingToSend)).ordered_by(order),
        )
        .await
    }

    /// Reports for an incident that have been sent, newest first.
    async fn sent(&self, incident_id: i64) -> Result<Vec<WeatherReport>> {
        self.query(ReportQuery::new(
            ReportFilter::by_status(SendStatus::Sent).with_incident(incident_id),
        ))
        .await
    }

    /// All sent reports, in the given order.
    async fn all_sent(&self, order: OrderBy) -> Result<Vec<WeatherReport>> {
        self.query(ReportQuery::new(ReportFilter::by_status(SendStatus::Sent)).ordered_by(order))
            .await
    }

    /// Every report for an incident, newest first.
    async fn for_incident(&self, incident_id: i64) -> Result<Vec<WeatherReport>> {
        self.query(ReportQuery::new(ReportFilter::by_incident(incident_id)))
            .await
    }

    /// Gets a report by its ID.
    async fn get_report(&self, id: i64) -> Result<Option<WeatherReport>> {
        let mut reports = self
            .query(ReportQuery::new(ReportFilter::by_id(id)).limit(1))
            .await?;
        Ok(reports.pop())
    }

    /// Sequence time of the newest report, optionally scoped to an incident.
    ///
    /// Returns `None` when no report matches.
    async fn latest_timestamp(&self, incident_id: Option<i64>) -> Result<Option<i64>> {
        let filter = ReportFilter {
            incident_id,
            ..ReportFilter::default()
        };
        let reports = self.query(ReportQuery::new(filter).limit(1)).await?;
        Ok(reports.first().map(|report| report.seq_time))
    }

    /// The newest report for an incident.
    async fn latest_for_incident(&self, incident_id: i64) -> Result<Option<WeatherReport>> {
        let mut reports = self
            .query(ReportQuery::new(ReportFilter::by_incident(incident_id)).limit(1))
            .await?;
        Ok(reports.pop())
    }
}
