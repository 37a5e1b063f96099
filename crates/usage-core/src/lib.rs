//! Vizusage Core
//!
//! Core types, SQLite repository schema, and read-only report queries for
//! Vizusage. The data model mirrors the four repository relations a BI
//! server maintains: workbooks, views, per-user view statistics, and users.

use serde::{Deserialize, Serialize};

pub mod integrity;
pub mod listing;
pub mod report;

/// A named container of views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    /// Repository identifier
    pub id: i64,
    /// Display name of the workbook
    pub name: String,
}

/// A named reporting artifact belonging to exactly one workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    /// Repository identifier
    pub id: i64,
    /// Owning workbook
    pub workbook_id: i64,
    /// Display name of the view
    pub name: String,
}

/// One observation of how many times a user viewed a given view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStat {
    /// Repository identifier
    pub id: i64,
    /// The view that was accessed
    pub view_id: i64,
    /// The user who accessed it
    pub user_id: i64,
    /// Number of accesses recorded by this observation (non-negative)
    pub nviews: i64,
}

/// An actor who views views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemUser {
    /// Repository identifier
    pub id: i64,
    /// Display name of the user
    pub name: String,
}

/// Errors that can occur in report operations
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, UsageError>;

/// Initialize the SQLite schema for a repository snapshot
///
/// Creates the four repository relations if they don't exist:
/// - `workbooks`: workbook registry
/// - `views`: views, each belonging to one workbook
/// - `views_stats`: per-user view-count observations
/// - `system_users`: user registry
///
/// Intended for snapshot databases and tests. A production repository is
/// owned and populated by the BI server itself; the report queries only
/// ever read from it.
pub fn init_repository_schema(conn: &rusqlite::Connection) -> Result<()> {
    let ddl = r#"
    -- Workbook registry
    CREATE TABLE IF NOT EXISTS workbooks (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL
    );

    -- Views, each owned by exactly one workbook
    CREATE TABLE IF NOT EXISTS views (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      workbook_id INTEGER NOT NULL,
      name TEXT NOT NULL,
      FOREIGN KEY (workbook_id) REFERENCES workbooks(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_views_workbook_id ON views(workbook_id);

    -- Per-user view-count observations
    CREATE TABLE IF NOT EXISTS views_stats (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      view_id INTEGER NOT NULL,
      user_id INTEGER NOT NULL,
      nviews INTEGER NOT NULL CHECK (nviews >= 0),
      FOREIGN KEY (view_id) REFERENCES views(id) ON DELETE CASCADE,
      FOREIGN KEY (user_id) REFERENCES system_users(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_views_stats_view_id ON views_stats(view_id);
    CREATE INDEX IF NOT EXISTS idx_views_stats_user_id ON views_stats(user_id);

    -- User registry
    CREATE TABLE IF NOT EXISTS system_users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL
    );
    "#;

    conn.execute_batch(ddl)?;
    Ok(())
}
