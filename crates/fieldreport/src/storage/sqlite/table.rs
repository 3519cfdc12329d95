//! Synchronous report table operations over a caller-owned connection.
//!
//! `ReportTable` never opens or closes a connection: every operation borrows
//! the handle it is given and releases its statement before returning.

use std::collections::HashSet;
use std::sync::Arc;

use fieldreport_core::report::{SendStatus, WeatherReport};
use fieldreport_core::storage::{ensure_insertable, ReportQuery, Result, StoreError};
use rusqlite::Connection;

use super::conversions::{format_datetime, report_to_json, row_to_report};
use super::error::map_rusqlite_error;
use super::schema;

/// One weather-report table in an SQLite database.
#[derive(Debug, Clone)]
pub struct ReportTable {
    name: Arc<str>,
}

impl Default for ReportTable {
    fn default() -> Self {
        Self {
            name: Arc::from(schema::DEFAULT_TABLE_NAME),
        }
    }
}

impl ReportTable {
    /// Creates a handle for the named table.
    ///
    /// The name must be a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !schema::is_valid_table_name(&name) {
            return Err(StoreError::InvalidData(format!("invalid table name: {name:?}")));
        }
        Ok(Self {
            name: Arc::from(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates the table and its indexes if missing, then checks that an
    /// existing table has every column of the descriptor.
    pub fn create_schema(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch(&schema::create_table_sql(&self.name))
            .map_err(schema_error)?;

        let existing = self.existing_columns(conn)?;
        let missing: Vec<&str> = schema::COLUMNS
            .iter()
            .map(|c| c.name)
            .filter(|name| !existing.contains(*name))
            .collect();

        if !missing.is_empty() {
            tracing::warn!(table = %self.name, ?missing, "existing table has incompatible shape");
            return Err(StoreError::Schema(format!(
                "table {} is missing columns: {}",
                self.name,
                missing.join(", ")
            )));
        }

        conn.execute_batch(&schema::create_indexes_sql(&self.name))
            .map_err(schema_error)?;

        tracing::debug!(table = %self.name, "report schema ready");
        Ok(())
    }

    fn existing_columns(&self, conn: &Connection) -> Result<HashSet<String>> {
        let map_err = |e: rusqlite::Error| map_rusqlite_error(&e, "create_schema");

        let mut stmt = conn
            .prepare(&schema::table_info_sql(&self.name))
            .map_err(map_err)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(map_err)?
            .collect::<rusqlite::Result<HashSet<_>>>()
            .map_err(map_err)?;
        Ok(names)
    }

    /// Inserts one report and returns its assigned ID.
    pub fn insert(&self, conn: &Connection, report: &WeatherReport) -> Result<i64> {
        ensure_insertable(report)?;
        let json = report_to_json(report)?;

        let id = self
            .insert_row(conn, report, &json)
            .map_err(|e| map_rusqlite_error(&e, "insert"))?;

        tracing::debug!(
            table = %self.name,
            id,
            incident_id = report.incident_id,
            send_status = %report.send_status,
            "inserted report"
        );
        Ok(id)
    }

    /// Inserts several reports in one transaction.
    ///
    /// Either every report is stored or none is.
    pub fn insert_all(
        &self,
        conn: &mut Connection,
        reports: &[WeatherReport],
    ) -> Result<Vec<i64>> {
        let payloads = reports
            .iter()
            .map(|report| {
                ensure_insertable(report)?;
                report_to_json(report)
            })
            .collect::<Result<Vec<_>>>()?;

        let map_err = |e: rusqlite::Error| map_rusqlite_error(&e, "insert_all");

        let tx = conn.transaction().map_err(map_err)?;
        let mut ids = Vec::with_capacity(reports.len());
        for (report, json) in reports.iter().zip(&payloads) {
            ids.push(self.insert_row(&tx, report, json).map_err(map_err)?);
        }
        tx.commit().map_err(map_err)?;

        tracing::debug!(table = %self.name, count = ids.len(), "inserted report batch");
        Ok(ids)
    }

    fn insert_row(
        &self,
        conn: &Connection,
        report: &WeatherReport,
        json: &str,
    ) -> rusqlite::Result<i64> {
        let message = &report.message;
        let time_taken = message.time_taken.as_ref().map(format_datetime);

        let mut stmt = conn.prepare_cached(&schema::insert_sql(&self.name))?;
        stmt.execute(rusqlite::params![
            report.is_draft,
            report.is_new,
            report.seq_num,
            report.seq_time,
            report.incident_id,
            message.user,
            message.data_source.id(),
            message.latitude,
            message.longitude,
            message.elevation,
            message.dry_bulb_temp,
            message.wet_bulb_temp,
            message.relative_humidity,
            message.wind_direction.id(),
            message.wind_speed,
            message.aspect.id(),
            message.physical_location,
            time_taken,
            message.status,
            report.send_status.id(),
            json,
        ])?;
        Ok(conn.last_insert_rowid())
    }

    /// Runs a report query.
    ///
    /// Ordering and limiting are done by SQLite. A row that cannot be
    /// hydrated fails the whole call with `StoreError::Serialization`.
    pub fn query(&self, conn: &Connection, query: &ReportQuery) -> Result<Vec<WeatherReport>> {
        let (sql, params) = schema::select_sql(&self.name, query);
        let map_err = |e: rusqlite::Error| map_rusqlite_error(&e, "query");

        let mut stmt = conn.prepare(&sql).map_err(map_err)?;
        let reports = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_report)
            .map_err(map_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_err)?;

        tracing::debug!(table = %self.name, %sql, rows = reports.len(), "queried reports");
        Ok(reports)
    }

    /// Changes the send status of one report.
    pub fn update_send_status(&self, conn: &Connection, id: i64, status: SendStatus) -> Result<()> {
        let rows = conn
            .execute(
                &schema::update_send_status_sql(&self.name),
                rusqlite::params![id, status.id()],
            )
            .map_err(|e| map_rusqlite_error(&e, "update_send_status"))?;
        if rows == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(table = %self.name, id, send_status = %status, "updated send status");
        Ok(())
    }

    /// Deletes one report.
    pub fn delete(&self, conn: &Connection, id: i64) -> Result<()> {
        let rows = conn
            .execute(&schema::delete_sql(&self.name), [id])
            .map_err(|e| map_rusqlite_error(&e, "delete"))?;
        if rows == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(table = %self.name, id, "deleted report");
        Ok(())
    }
}

/// Maps a schema definition failure, keeping unavailability distinct.
fn schema_error(err: rusqlite::Error) -> StoreError {
    match map_rusqlite_error(&err, "create_schema") {
        unavailable @ StoreError::Unavailable(_) => unavailable,
        _ => StoreError::Schema(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fieldreport_core::report::{Aspect, DataSource, WeatherObservation, WindDirection};
    use fieldreport_core::storage::{OrderBy, ReportFilter, SortColumn, SortDirection};

    fn setup() -> (Connection, ReportTable) {
        let conn = Connection::open_in_memory().unwrap();
        let table = ReportTable::default();
        table.create_schema(&conn).unwrap();
        (conn, table)
    }

    fn report(incident: i64, seq_time: i64, status: SendStatus) -> WeatherReport {
        WeatherReport::new(incident, seq_time, WeatherObservation::new("obs", 40.0, -105.0))
            .with_send_status(status)
    }

    fn ids(reports: &[WeatherReport]) -> Vec<i64> {
        reports.iter().filter_map(|r| r.id).collect()
    }

    #[test]
    fn test_table_name_is_validated() {
        assert!(ReportTable::new("wx_reports").is_ok());
        assert!(matches!(
            ReportTable::new("bad name"),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let (conn, table) = setup();
        assert!(table.create_schema(&conn).is_ok());
    }

    #[test]
    fn test_create_schema_rejects_incompatible_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE weather_reports (id INTEGER PRIMARY KEY, json TEXT)")
            .unwrap();

        let result = ReportTable::default().create_schema(&conn);

        match result {
            Err(StoreError::Schema(msg)) => {
                assert!(msg.contains("seq_time"));
                assert!(!msg.contains(" json"));
            }
            other => panic!("Expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_then_query_by_id_round_trips() {
        let (conn, table) = setup();
        let mut message = WeatherObservation::new("ops@example.org", 39.7392, -104.9903);
        message.data_source = DataSource::Station;
        message.elevation = Some(1609.3);
        message.dry_bulb_temp = Some(88.0);
        message.wet_bulb_temp = Some(61.5);
        message.relative_humidity = Some(18.0);
        message.wind_direction = WindDirection::Sw;
        message.wind_speed = Some(22.0);
        message.aspect = Aspect::S;
        message.physical_location = Some("Division B staging".to_string());
        message.time_taken = Some(Utc.with_ymd_and_hms(2024, 7, 1, 14, 5, 0).unwrap());
        message.status = Some("Red flag conditions".to_string());
        let original = WeatherReport::new(11, 1_719_842_700, message)
            .with_seq_num(4)
            .with_draft(true);

        let id = table.insert(&conn, &original).unwrap();
        let found = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_id(id)))
            .unwrap();

        assert_eq!(found.len(), 1);
        let mut expected = original.clone();
        expected.id = Some(id);
        assert_eq!(found[0], expected);
    }

    #[test]
    fn test_full_precision_coordinates_round_trip() {
        let (conn, table) = setup();
        let mut message = WeatherObservation::new("obs", 29.556368732129314, 19.171093237089366);
        message.elevation = Some(1234.5678901234567);
        message.dry_bulb_temp = Some(0.1 + 0.2);
        let original = WeatherReport::new(2, 1_700_000_000, message);

        let id = table.insert(&conn, &original).unwrap();
        let found = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_id(id)))
            .unwrap();
        let column: f64 = conn
            .query_row(
                "SELECT latitude FROM weather_reports WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .unwrap();

        let expected = original.with_id(id);
        assert_eq!(found[0], expected);
        assert_eq!(found[0].message.latitude, column);
    }

    #[test]
    fn test_insert_writes_denormalized_columns() {
        let (conn, table) = setup();
        let mut r = report(3, 500, SendStatus::Sent);
        r.message.wind_direction = WindDirection::Ene;
        r.message.relative_humidity = Some(33.0);
        let id = table.insert(&conn, &r).unwrap();

        let (incident, wind, humidity, status): (i64, i64, f64, i64) = conn
            .query_row(
                "SELECT incident_id, wind_direction, relative_humidity, send_status \
                 FROM weather_reports WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();

        assert_eq!(incident, 3);
        assert_eq!(wind, WindDirection::Ene.id());
        assert_eq!(humidity, 33.0);
        assert_eq!(status, SendStatus::Sent.id());
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let (conn, table) = setup();
        let first = table.insert(&conn, &report(1, 1, SendStatus::Sent)).unwrap();
        let second = table.insert(&conn, &report(1, 2, SendStatus::Sent)).unwrap();
        assert!(first > 0);
        assert!(second > first);
    }

    #[test]
    fn test_insert_rejects_preassigned_id() {
        let (conn, table) = setup();
        let result = table.insert(&conn, &report(1, 1, SendStatus::Sent).with_id(9));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));

        let all = table.query(&conn, &ReportQuery::default()).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_status_and_incident_scoped_queries() {
        let (conn, table) = setup();
        let a = table.insert(&conn, &report(1, 100, SendStatus::WaitingToSend)).unwrap();
        let b = table.insert(&conn, &report(1, 200, SendStatus::Sent)).unwrap();
        let c = table.insert(&conn, &report(2, 150, SendStatus::WaitingToSend)).unwrap();

        let ready = table
            .query(
                &conn,
                &ReportQuery::new(ReportFilter::by_status(SendStatus::WaitingToSend).with_incident(1)),
            )
            .unwrap();
        assert_eq!(ids(&ready), vec![a]);

        let incident = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_incident(1)))
            .unwrap();
        assert_eq!(ids(&incident), vec![b, a]);

        let all_ready = table
            .query(
                &conn,
                &ReportQuery::new(ReportFilter::by_status(SendStatus::WaitingToSend)).ordered_by(
                    OrderBy::new(SortColumn::SeqTime, SortDirection::Ascending),
                ),
            )
            .unwrap();
        assert_eq!(ids(&all_ready), vec![a, c]);
    }

    #[test]
    fn test_equal_seq_time_breaks_ties_by_id() {
        let (conn, table) = setup();
        let first = table.insert(&conn, &report(1, 100, SendStatus::Sent)).unwrap();
        let second = table.insert(&conn, &report(1, 100, SendStatus::Sent)).unwrap();

        let newest = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_incident(1)))
            .unwrap();
        assert_eq!(ids(&newest), vec![second, first]);
    }

    #[test]
    fn test_limit_caps_results() {
        let (conn, table) = setup();
        for t in [10, 30, 20] {
            table.insert(&conn, &report(1, t, SendStatus::Sent)).unwrap();
        }

        let top = table
            .query(&conn, &ReportQuery::new(ReportFilter::all()).limit(2))
            .unwrap();
        let times: Vec<i64> = top.iter().map(|r| r.seq_time).collect();
        assert_eq!(times, vec![30, 20]);
    }

    #[test]
    fn test_malformed_row_fails_the_batch() {
        let (conn, table) = setup();
        table.insert(&conn, &report(1, 100, SendStatus::Sent)).unwrap();
        table.insert(&conn, &report(1, 300, SendStatus::Sent)).unwrap();
        conn.execute(
            "UPDATE weather_reports SET json = '{broken' WHERE seq_time = 300",
            [],
        )
        .unwrap();

        let result = table.query(&conn, &ReportQuery::new(ReportFilter::by_incident(1)));

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_query_on_missing_table_is_statement_error() {
        let conn = Connection::open_in_memory().unwrap();
        let result = ReportTable::default().query(&conn, &ReportQuery::default());
        assert!(matches!(result, Err(StoreError::Statement(_))));
    }

    #[test]
    fn test_insert_all_is_atomic() {
        let (mut conn, table) = setup();
        let mut bad = report(1, 300, SendStatus::Sent);
        bad.message.latitude = 120.0;

        let result = table.insert_all(&mut conn, &[report(1, 100, SendStatus::Sent), bad]);
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert!(table.query(&conn, &ReportQuery::default()).unwrap().is_empty());

        let ids = table
            .insert_all(
                &mut conn,
                &[report(1, 100, SendStatus::Sent), report(2, 200, SendStatus::Sent)],
            )
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(table.query(&conn, &ReportQuery::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_insert_all_rolls_back_on_statement_failure() {
        let (mut conn, table) = setup();
        conn.execute_batch(
            "CREATE TRIGGER reject_incident_9 BEFORE INSERT ON weather_reports \
             WHEN NEW.incident_id = 9 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        let result = table.insert_all(
            &mut conn,
            &[report(1, 100, SendStatus::Sent), report(9, 200, SendStatus::Sent)],
        );

        assert!(matches!(result, Err(StoreError::Statement(_))));
        assert!(table.query(&conn, &ReportQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_update_send_status_moves_report_between_queries() {
        let (conn, table) = setup();
        let id = table.insert(&conn, &report(1, 100, SendStatus::WaitingToSend)).unwrap();

        table.update_send_status(&conn, id, SendStatus::Sent).unwrap();

        let ready = table
            .query(
                &conn,
                &ReportQuery::new(ReportFilter::by_status(SendStatus::WaitingToSend)),
            )
            .unwrap();
        let sent = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_status(SendStatus::Sent)))
            .unwrap();
        assert!(ready.is_empty());
        assert_eq!(ids(&sent), vec![id]);
        assert_eq!(sent[0].send_status, SendStatus::Sent);
    }

    #[test]
    fn test_update_and_delete_missing_row() {
        let (conn, table) = setup();
        assert_eq!(
            table.update_send_status(&conn, 77, SendStatus::Sent),
            Err(StoreError::NotFound { id: 77 })
        );
        assert_eq!(table.delete(&conn, 77), Err(StoreError::NotFound { id: 77 }));
    }

    #[test]
    fn test_delete_removes_row() {
        let (conn, table) = setup();
        let id = table.insert(&conn, &report(1, 100, SendStatus::Sent)).unwrap();

        table.delete(&conn, id).unwrap();

        let found = table
            .query(&conn, &ReportQuery::new(ReportFilter::by_id(id)))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_custom_table_name() {
        let conn = Connection::open_in_memory().unwrap();
        let table = ReportTable::new("wx_archive").unwrap();
        table.create_schema(&conn).unwrap();

        table.insert(&conn, &report(5, 10, SendStatus::Saved)).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM wx_archive", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
