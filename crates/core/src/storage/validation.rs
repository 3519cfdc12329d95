use crate::report::{validate_report, WeatherReport};

use super::{Result, StoreError};

/// Checks that a report can be inserted: no assigned id and valid contents.
pub fn ensure_insertable(report: &WeatherReport) -> Result<()> {
    if let Some(id) = report.id {
        return Err(StoreError::InvalidData(format!(
            "report already has id {id}; ids are assigned on insert"
        )));
    }
    validate_report(report).map_err(|e| StoreError::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::WeatherObservation;

    fn report() -> WeatherReport {
        WeatherReport::new(1, 100, WeatherObservation::new("obs", 1.0, 1.0))
    }

    #[test]
    fn test_ensure_insertable_accepts_new_report() {
        assert!(ensure_insertable(&report()).is_ok());
    }

    #[test]
    fn test_ensure_insertable_rejects_assigned_id() {
        let result = ensure_insertable(&report().with_id(3));
        assert!(matches!(result, Err(StoreError::InvalidData(msg)) if msg.contains("id 3")));
    }

    #[test]
    fn test_ensure_insertable_rejects_invalid_contents() {
        let mut r = report();
        r.message.user.clear();
        assert_eq!(
            ensure_insertable(&r),
            Err(StoreError::InvalidData("Report user cannot be empty".to_string()))
        );
    }

    #[test]
    fn test_ensure_insertable_rejects_non_finite_measurements() {
        let mut r = report();
        r.message.wind_speed = Some(f64::NAN);
        r.message.elevation = Some(f64::INFINITY);
        assert_eq!(
            ensure_insertable(&r),
            Err(StoreError::InvalidData(
                "Measurement elevation must be a finite number".to_string()
            ))
        );
    }
}
