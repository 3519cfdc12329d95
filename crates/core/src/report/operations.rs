use std::cmp::Ordering;

use crate::storage::{Limit, OrderBy, ReportFilter, SortColumn, SortDirection};

use super::error::ReportError;
use super::types::WeatherReport;

/// Validates a report before it is stored.
pub fn validate_report(report: &WeatherReport) -> Result<(), ReportError> {
    let message = &report.message;

    if message.user.trim().is_empty() {
        return Err(ReportError::EmptyUser);
    }
    if !(-90.0..=90.0).contains(&message.latitude) {
        return Err(ReportError::InvalidLatitude(message.latitude));
    }
    if !(-180.0..=180.0).contains(&message.longitude) {
        return Err(ReportError::InvalidLongitude(message.longitude));
    }
    // Non-finite values would be stored as NULL and read back as None.
    let measurements = [
        ("elevation", message.elevation),
        ("dryBulbTemp", message.dry_bulb_temp),
        ("wetBulbTemp", message.wet_bulb_temp),
        ("relativeHumidity", message.relative_humidity),
        ("windSpeed", message.wind_speed),
    ];
    for (name, value) in measurements {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(ReportError::NonFiniteMeasurement(name));
        }
    }
    if let Some(humidity) = message.relative_humidity {
        if !(0.0..=100.0).contains(&humidity) {
            return Err(ReportError::InvalidHumidity(humidity));
        }
    }
    if let Some(speed) = message.wind_speed {
        if speed < 0.0 {
            return Err(ReportError::NegativeWindSpeed(speed));
        }
    }
    // -1 is reserved as the "no data" timestamp.
    if report.seq_time < 0 {
        return Err(ReportError::NegativeSeqTime(report.seq_time));
    }
    Ok(())
}

/// Returns true if the report satisfies every field set on the filter.
pub fn matches_filter(report: &WeatherReport, filter: &ReportFilter) -> bool {
    filter.id.is_none_or(|id| report.id == Some(id))
        && filter
            .incident_id
            .is_none_or(|incident| report.incident_id == incident)
        && filter
            .send_status
            .is_none_or(|status| report.send_status == status)
}

/// Sorts reports in place, breaking ties by id in the same direction.
pub fn sort_reports(reports: &mut [WeatherReport], order: OrderBy) {
    reports.sort_by(|a, b| {
        let primary = match order.column {
            SortColumn::SeqTime => a.seq_time.cmp(&b.seq_time),
            SortColumn::SeqNum => a.seq_num.cmp(&b.seq_num),
            SortColumn::Id => Ordering::Equal,
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Filters, orders and limits a slice of reports.
pub fn select_reports(
    reports: &[WeatherReport],
    filter: &ReportFilter,
    order: OrderBy,
    limit: Limit,
) -> Vec<WeatherReport> {
    let mut selected: Vec<WeatherReport> = reports
        .iter()
        .filter(|report| matches_filter(report, filter))
        .cloned()
        .collect();
    sort_reports(&mut selected, order);
    if let Limit::At(max) = limit {
        selected.truncate(max as usize);
    }
    selected
}
