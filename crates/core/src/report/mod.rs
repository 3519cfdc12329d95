mod error;
mod operations;
mod types;

pub use error::ReportError;
pub use operations::{matches_filter, select_reports, sort_reports, validate_report};
pub use types::{Aspect, DataSource, SendStatus, WeatherObservation, WeatherReport, WindDirection};
