//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fieldreport_core::report::{SendStatus, WeatherReport};
use fieldreport_core::storage::{OrderBy, SortColumn, SortDirection};
use serde::Deserialize;

/// Local weather-report store.
#[derive(Debug, Parser)]
#[command(name = "fieldreport")]
#[command(version, about = "Local weather-report store", long_about = None)]
pub struct Cli {
    /// SQLite database path (overrides FIELDREPORT_DB).
    #[arg(long)]
    pub db: Option<String>,

    /// Report table name (overrides FIELDREPORT_TABLE).
    #[arg(long)]
    pub table: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Column to order listings by.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    SeqTime,
    SeqNum,
    Id,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::SeqTime => SortColumn::SeqTime,
            SortArg::SeqNum => SortColumn::SeqNum,
            SortArg::Id => SortColumn::Id,
        }
    }
}

/// CLI send status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    WaitingToSend,
    Sent,
    Saved,
}

impl From<StatusArg> for SendStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::WaitingToSend => SendStatus::WaitingToSend,
            StatusArg::Sent => SendStatus::Sent,
            StatusArg::Saved => SendStatus::Saved,
        }
    }
}

/// Ordering options shared by the status listings.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct OrderArgs {
    /// Column to order by.
    #[arg(long, value_enum, default_value = "seq-time")]
    pub order: SortArg,
    /// Oldest first instead of newest first.
    #[arg(long)]
    pub asc: bool,
}

impl From<OrderArgs> for OrderBy {
    fn from(args: OrderArgs) -> Self {
        let direction = if args.asc {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        OrderBy::new(args.order.into(), direction)
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the report table.
    Init,
    /// Add reports from a JSON file ("-" reads stdin).
    Add {
        /// File holding one report object or an array of reports.
        path: PathBuf,
    },
    /// List reports waiting to be sent.
    Ready {
        /// Only reports for this incident (newest first).
        #[arg(long)]
        incident: Option<i64>,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// List reports that have been sent.
    Sent {
        /// Only reports for this incident (newest first).
        #[arg(long)]
        incident: Option<i64>,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// List every report for an incident, newest first.
    Incident {
        /// Incident ID.
        incident_id: i64,
    },
    /// Get report by ID.
    Get {
        /// Report ID.
        id: i64,
    },
    /// Show the newest report timestamp (-1 when there is none).
    Latest {
        /// Restrict to one incident.
        #[arg(long)]
        incident: Option<i64>,
        /// Show the newest report instead of its timestamp.
        #[arg(long, requires = "incident")]
        report: bool,
    },
    /// Change a report's send status.
    SetStatus {
        /// Report ID.
        id: i64,
        /// New send status.
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Delete a report.
    Delete {
        /// Report ID.
        id: i64,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportInput {
    Many(Vec<WeatherReport>),
    One(Box<WeatherReport>),
}

/// Parse `add` input: a single report object or an array of reports.
pub fn parse_reports(input: &str) -> serde_json::Result<Vec<WeatherReport>> {
    Ok(match serde_json::from_str(input)? {
        ReportInput::Many(reports) => reports,
        ReportInput::One(report) => vec![*report],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "seqTime": 1700000000,
        "incidentId": 4,
        "message": {"user": "obs", "latitude": 44.0, "longitude": -121.3}
    }"#;

    #[test]
    fn test_parse_single_report() {
        let reports = parse_reports(REPORT).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].incident_id, 4);
    }

    #[test]
    fn test_parse_report_array() {
        let input = format!("[{REPORT}, {REPORT}]");
        let reports = parse_reports(&input).unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_reports("{\"seqTime\": \"soon\"}").is_err());
    }

    #[test]
    fn test_order_args_conversion() {
        let order: OrderBy = OrderArgs {
            order: SortArg::SeqNum,
            asc: true,
        }
        .into();
        assert_eq!(
            order,
            OrderBy::new(SortColumn::SeqNum, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_cli_parses_latest_report_requires_incident() {
        assert!(Cli::try_parse_from(["fieldreport", "latest", "--report"]).is_err());
        let cli =
            Cli::try_parse_from(["fieldreport", "latest", "--incident", "3", "--report"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Latest {
                incident: Some(3),
                report: true
            }
        ));
    }

    #[test]
    fn test_cli_parses_set_status() {
        let cli = Cli::try_parse_from(["fieldreport", "set-status", "12", "sent"]).unwrap();
        match cli.command {
            Commands::SetStatus { id, status } => {
                assert_eq!(id, 12);
                assert_eq!(SendStatus::from(status), SendStatus::Sent);
            }
            other => panic!("Expected SetStatus, got {other:?}"),
        }
    }
}
