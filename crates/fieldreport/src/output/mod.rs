//! Output formatting functions.

pub mod pretty;

use fieldreport_core::report::WeatherReport;
use serde::Serialize;

use crate::cli::OutputFormat;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format a list of reports.
pub fn format_reports(reports: &[WeatherReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(reports),
        OutputFormat::Pretty => pretty::format_reports(reports),
    }
}

/// Format a single report.
pub fn format_report(report: &WeatherReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Pretty => pretty::format_report(report),
    }
}

/// Format a lookup that may have found nothing (`null` in JSON).
pub fn format_optional_report(report: Option<&WeatherReport>, format: OutputFormat) -> String {
    match (format, report) {
        (OutputFormat::Json, report) => to_json(&report),
        (OutputFormat::Pretty, Some(report)) => pretty::format_report(report),
        (OutputFormat::Pretty, None) => "No reports found.".to_string(),
    }
}

/// Format the ids assigned by `add`.
pub fn format_ids(ids: &[i64], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(ids),
        OutputFormat::Pretty => ids
            .iter()
            .map(|id| format!("Added report {id}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldreport_core::report::WeatherObservation;

    fn report() -> WeatherReport {
        WeatherReport::new(7, 1_700_000_000, WeatherObservation::new("obs", 44.0, -121.25))
            .with_id(9)
    }

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[3, 4], OutputFormat::Json), "[3,4]");
        assert_eq!(
            format_ids(&[3, 4], OutputFormat::Pretty),
            "Added report 3\nAdded report 4"
        );
    }

    #[test]
    fn test_format_report_json_is_parseable() {
        let original = report();
        let output = format_report(&original, OutputFormat::Json);
        let parsed: WeatherReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_format_reports_pretty_uses_listing() {
        let output = format_reports(&[report()], OutputFormat::Pretty);
        assert!(output.starts_with("REPORTS (1)"));
        assert!(output.contains("Report 9"));
    }

    #[test]
    fn test_format_optional_report_when_missing() {
        assert_eq!(format_optional_report(None, OutputFormat::Json), "null");
        assert_eq!(
            format_optional_report(None, OutputFormat::Pretty),
            "No reports found."
        );
        assert!(format_optional_report(Some(&report()), OutputFormat::Pretty)
            .starts_with("Report 9"));
    }
}
