//! Vizusage CLI
//!
//! Runs popularity reports against a repository snapshot and prints them
//! as a table or JSON.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use vizusage_core::{integrity, report, Result};
use vizusage_storage::{LocalSqliteBackend, RepositoryBackend};

mod table;

#[derive(Parser)]
#[command(name = "vizusage", version, about = "Popularity reports over a BI repository snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new, empty repository snapshot database
    Init {
        /// Path to the snapshot database file
        db: String,
    },
    /// View counts per workbook/view/user (the core report)
    Report {
        /// Path to the snapshot database file
        db: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Total views per workbook
    Workbooks {
        /// Path to the snapshot database file
        db: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Most-viewed views across all workbooks
    TopViews {
        /// Path to the snapshot database file
        db: String,
        /// Maximum number of rows to return
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Views with no recorded traffic
    IdleViews {
        /// Path to the snapshot database file
        db: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Verify that every foreign key in the snapshot resolves
    Check {
        /// Path to the snapshot database file
        db: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { db } => {
            let backend = LocalSqliteBackend::new(&db);
            backend.create_snapshot()?;
            println!("Initialized repository snapshot at {db}");
        }
        Command::Report { db, format } => {
            let conn = open(&db)?;
            let rows = report::view_counts_by_user(&conn)?;
            emit(&rows, format, &["workbook", "view", "user", "total views"], |r| {
                vec![
                    r.workbook_name.clone(),
                    r.view_name.clone(),
                    r.user_name.clone(),
                    r.total_views.to_string(),
                ]
            })?;
        }
        Command::Workbooks { db, format } => {
            let conn = open(&db)?;
            let rows = report::workbook_totals(&conn)?;
            emit(&rows, format, &["workbook", "total views"], |r| {
                vec![r.workbook_name.clone(), r.total_views.to_string()]
            })?;
        }
        Command::TopViews { db, limit, format } => {
            let conn = open(&db)?;
            let rows = report::top_views(&conn, limit)?;
            emit(&rows, format, &["workbook", "view", "total views"], |r| {
                vec![
                    r.workbook_name.clone(),
                    r.view_name.clone(),
                    r.total_views.to_string(),
                ]
            })?;
        }
        Command::IdleViews { db, format } => {
            let conn = open(&db)?;
            let rows = report::idle_views(&conn)?;
            emit(&rows, format, &["workbook", "view"], |r| {
                vec![r.workbook_name.clone(), r.view_name.clone()]
            })?;
        }
        Command::Check { db } => {
            let conn = open(&db)?;
            integrity::check_referential_integrity(&conn)?;
            println!("ok");
        }
    }

    Ok(())
}

/// Open a read-only connection to an existing snapshot
fn open(db: &str) -> Result<rusqlite::Connection> {
    LocalSqliteBackend::new(db).open_reader()
}

/// Print rows as a table or as JSON
fn emit<T, F>(rows: &[T], format: OutputFormat, headers: &[&str], to_cells: F) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows)
                .map_err(|e| vizusage_core::UsageError::Other(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows.iter().map(&to_cells).collect();
            print!("{}", table::render(headers, &cells));
        }
    }
    Ok(())
}
