//! Vizusage Storage
//!
//! Snapshot lifecycle for the repository database. A snapshot is created
//! once (schema bootstrap), populated outside this crate, and from then on
//! only ever opened read-only for reports. The trait keeps the report
//! layer independent of where the snapshot lives.

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use vizusage_core::{init_repository_schema, Result, UsageError};

/// Backend abstraction for repository snapshot access
///
/// The lifecycle has exactly two paths: `create_snapshot` bootstraps a new
/// database, and `open_reader` hands out read-only connections to an
/// existing one. Reports never receive a writable handle.
pub trait RepositoryBackend: Send + Sync {
    /// Open a read-only connection to an existing snapshot
    ///
    /// Fails with [`UsageError::DataAccess`] if the snapshot does not
    /// exist. The returned connection cannot execute DDL or DML, which
    /// keeps every report operation read-only by construction.
    fn open_reader(&self) -> Result<Connection>;

    /// Check if the snapshot exists
    fn exists(&self) -> Result<bool>;

    /// Create a new snapshot database with the repository schema
    ///
    /// Fails with [`UsageError::DataAccess`] if a snapshot is already
    /// present; an existing snapshot is never overwritten.
    fn create_snapshot(&self) -> Result<()>;
}

/// Local filesystem SQLite backend
///
/// Keeps the repository snapshot as a single SQLite file.
#[derive(Clone, Debug)]
pub struct LocalSqliteBackend {
    path: PathBuf,
}

impl LocalSqliteBackend {
    /// Create a backend for the snapshot file at `path`
    ///
    /// # Example
    /// ```
    /// use vizusage_storage::LocalSqliteBackend;
    ///
    /// let backend = LocalSqliteBackend::new("repository.db");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RepositoryBackend for LocalSqliteBackend {
    fn open_reader(&self) -> Result<Connection> {
        if !self.exists()? {
            return Err(UsageError::DataAccess(format!(
                "Repository snapshot not found at {:?}",
                self.path
            )));
        }

        // Read-only open: the engine itself rejects any write a caller
        // might attempt through this handle. Schema bootstrap happened at
        // snapshot creation, so no DDL runs here.
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(conn)
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.path.exists())
    }

    fn create_snapshot(&self) -> Result<()> {
        if self.exists()? {
            return Err(UsageError::DataAccess(format!(
                "Repository snapshot already exists at {:?}",
                self.path
            )));
        }

        tracing::info!(path = %self.path.display(), "creating repository snapshot");

        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_repository_schema(&conn)?;

        Ok(())
    }
}
