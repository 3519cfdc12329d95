//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and reports.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use fieldreport_core::report::{SendStatus, WeatherReport};
use fieldreport_core::storage::StoreError;
use rusqlite::types::Type;
use rusqlite::Row;

/// Serialize a report to its canonical JSON payload.
pub fn report_to_json(report: &WeatherReport) -> Result<String, StoreError> {
    serde_json::to_string(report).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Hydrate a report from a row.
///
/// Expected columns: id, is_draft, is_new, send_status, json.
/// The payload comes from `json`; id, flags and send status are taken
/// from their columns, which are authoritative.
pub fn row_to_report(row: &Row) -> rusqlite::Result<WeatherReport> {
    let id: i64 = row.get(0)?;
    let is_draft: bool = row.get(1)?;
    let is_new: bool = row.get(2)?;
    let send_status: i64 = row.get(3)?;
    let json: String = row.get(4)?;

    let mut report = json_to_report_internal(&json, 4)?;
    report.id = Some(id);
    report.is_draft = is_draft;
    report.is_new = is_new;
    report.send_status = parse_send_status(send_status, 3)?;

    Ok(report)
}

/// Internal version that returns rusqlite::Result for use in row conversions.
fn json_to_report_internal(json: &str, idx: usize) -> rusqlite::Result<WeatherReport> {
    serde_json::from_str(json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse SendStatus from its column id.
fn parse_send_status(id: i64, idx: usize) -> rusqlite::Result<SendStatus> {
    SendStatus::from_id(id).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Unknown send status: {id}"),
            )),
        )
    })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
