use std::env;

use crate::storage::sqlite::DEFAULT_TABLE_NAME;

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file (default: "fieldreport.db")
    pub sqlite_path: String,
    /// Report table name (default: "weather_reports")
    pub table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FIELDREPORT_DB` - SQLite database path (default: "fieldreport.db")
    /// - `FIELDREPORT_TABLE` - Report table name (default: "weather_reports")
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("FIELDREPORT_DB").unwrap_or_else(|_| "fieldreport.db".to_string()),
            table_name: env::var("FIELDREPORT_TABLE")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
        }
    }

    /// Replace values with those given on the command line, if any.
    pub fn with_overrides(mut self, sqlite_path: Option<String>, table_name: Option<String>) -> Self {
        if let Some(path) = sqlite_path {
            self.sqlite_path = path;
        }
        if let Some(table) = table_name {
            self.table_name = table;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let config = Config {
            sqlite_path: "reports.db".to_string(),
            table_name: "weather_reports".to_string(),
        };

        let config = config.with_overrides(Some("/tmp/other.db".to_string()), None);

        assert_eq!(config.sqlite_path, "/tmp/other.db");
        assert_eq!(config.table_name, "weather_reports");
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("FIELDREPORT_DB");
        env::remove_var("FIELDREPORT_TABLE");

        let config = Config::from_env();

        assert_eq!(config.sqlite_path, "fieldreport.db");
        assert_eq!(config.table_name, "weather_reports");
    }
}
