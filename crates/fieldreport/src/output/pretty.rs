//! Pretty output formatting.

use fieldreport_core::report::WeatherReport;

/// Format a report for display.
pub fn format_report(report: &WeatherReport) -> String {
    let message = &report.message;
    let id = report
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut output = format!(
        "Report {} [{}]{}\n  Incident: {}\n  Seq: {} @ {}\n  User: {}\n  Location: {:.5}, {:.5}",
        id,
        report.send_status,
        if report.is_draft { " (draft)" } else { "" },
        report.incident_id,
        report.seq_num,
        report.seq_time,
        message.user,
        message.latitude,
        message.longitude
    );
    if let Some(place) = &message.physical_location {
        output.push_str(&format!("\n  Place: {}", place));
    }
    if let Some(temp) = message.dry_bulb_temp {
        output.push_str(&format!("\n  Dry bulb: {}°F", temp));
    }
    if let Some(humidity) = message.relative_humidity {
        output.push_str(&format!("\n  Humidity: {}%", humidity));
    }
    if let Some(speed) = message.wind_speed {
        output.push_str(&format!(
            "\n  Wind: {:?} {} mph",
            message.wind_direction, speed
        ));
    }
    if let Some(taken) = &message.time_taken {
        output.push_str(&format!("\n  Taken: {}", taken.to_rfc3339()));
    }
    if let Some(status) = &message.status {
        output.push_str(&format!("\n  Status: {}", status));
    }
    output
}

/// Format reports for display.
pub fn format_reports(reports: &[WeatherReport]) -> String {
    if reports.is_empty() {
        return "No reports found.".to_string();
    }
    let mut output = format!("REPORTS ({})\n", reports.len());
    output.push_str(&"-".repeat(40));
    for report in reports {
        output.push_str(&format!("\n{}", format_report(report)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldreport_core::report::{SendStatus, WeatherObservation};

    #[test]
    fn test_format_report_includes_optional_fields() {
        let mut message = WeatherObservation::new("obs", 44.0, -121.25);
        message.relative_humidity = Some(12.0);
        message.status = Some("Gusty".to_string());
        let report = WeatherReport::new(4, 900, message)
            .with_send_status(SendStatus::Sent)
            .with_id(3);

        let output = format_report(&report);

        assert!(output.starts_with("Report 3 [sent]"));
        assert!(output.contains("Incident: 4"));
        assert!(output.contains("Humidity: 12%"));
        assert!(output.contains("Status: Gusty"));
        assert!(!output.contains("Wind:"));
    }

    #[test]
    fn test_format_reports_empty() {
        assert_eq!(format_reports(&[]), "No reports found.");
    }
}
