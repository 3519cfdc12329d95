//! fieldreport CLI entry point.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use fieldreport::cli::{parse_reports, Cli, Commands, OutputFormat};
use fieldreport::output::{format_ids, format_optional_report, format_report, format_reports};
use fieldreport::{Config, ReportTable, SqliteRepository};
use fieldreport_core::report::SendStatus;
use fieldreport_core::storage::{timestamp_or_sentinel, ReportRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldreport=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().with_overrides(cli.db.clone(), cli.table.clone());
    let table = ReportTable::new(config.table_name.clone())?;
    let repo = SqliteRepository::new(&config.sqlite_path, table)
        .await
        .with_context(|| format!("failed to open report store at {}", config.sqlite_path))?;

    match cli.command {
        Commands::Init => {
            if !cli.quiet {
                println!(
                    "Initialized table {} in {}",
                    repo.table().name(),
                    config.sqlite_path
                );
            }
        }
        Commands::Add { path } => {
            let input = read_input(&path)?;
            let reports = parse_reports(&input)
                .with_context(|| format!("invalid report JSON in {}", path.display()))?;
            let ids = match reports.as_slice() {
                [report] => vec![repo.insert(report).await?],
                _ => repo.insert_all(&reports).await?,
            };
            if !(cli.quiet && matches!(cli.format, OutputFormat::Pretty)) {
                println!("{}", format_ids(&ids, cli.format));
            }
        }
        Commands::Ready { incident, order } => {
            let reports = match incident {
                Some(incident_id) => repo.ready_to_send(incident_id).await?,
                None => repo.all_ready_to_send(order.into()).await?,
            };
            println!("{}", format_reports(&reports, cli.format));
        }
        Commands::Sent { incident, order } => {
            let reports = match incident {
                Some(incident_id) => repo.sent(incident_id).await?,
                None => repo.all_sent(order.into()).await?,
            };
            println!("{}", format_reports(&reports, cli.format));
        }
        Commands::Incident { incident_id } => {
            let reports = repo.for_incident(incident_id).await?;
            println!("{}", format_reports(&reports, cli.format));
        }
        Commands::Get { id } => {
            let report = repo
                .get_report(id)
                .await?
                .with_context(|| format!("report {} not found", id))?;
            println!("{}", format_report(&report, cli.format));
        }
        Commands::Latest { incident, report } => {
            if report {
                let incident_id = incident.context("--report requires --incident")?;
                let latest = repo.latest_for_incident(incident_id).await?;
                println!("{}", format_optional_report(latest.as_ref(), cli.format));
            } else {
                let timestamp = timestamp_or_sentinel(repo.latest_timestamp(incident).await?);
                println!("{}", timestamp);
            }
        }
        Commands::SetStatus { id, status } => {
            let status = SendStatus::from(status);
            repo.update_send_status(id, status).await?;
            if !cli.quiet {
                println!("Report {} marked {}", id, status);
            }
        }
        Commands::Delete { id } => {
            repo.delete(id).await?;
            if !cli.quiet {
                println!("Deleted report {}", id);
            }
        }
    }

    repo.close().await?;
    Ok(())
}

/// Read command input from a file, or from stdin when the path is "-".
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
