use thiserror::Error;

/// Errors that can occur when validating a weather report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    #[error("Report user cannot be empty")]
    EmptyUser,
    #[error("Latitude out of range: {0}")]
    InvalidLatitude(f64),
    #[error("Longitude out of range: {0}")]
    InvalidLongitude(f64),
    #[error("Relative humidity out of range (0-100): {0}")]
    InvalidHumidity(f64),
    #[error("Measurement {0} must be a finite number")]
    NonFiniteMeasurement(&'static str),
    #[error("Wind speed cannot be negative: {0}")]
    NegativeWindSpeed(f64),
    #[error("Sequence time cannot be negative: {0}")]
    NegativeSeqTime(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        assert_eq!(
            ReportError::EmptyUser.to_string(),
            "Report user cannot be empty"
        );
        assert_eq!(
            ReportError::InvalidLatitude(91.5).to_string(),
            "Latitude out of range: 91.5"
        );
        assert_eq!(
            ReportError::NonFiniteMeasurement("elevation").to_string(),
            "Measurement elevation must be a finite number"
        );
        assert_eq!(
            ReportError::NegativeSeqTime(-1).to_string(),
            "Sequence time cannot be negative: -1"
        );
    }
}
