//! # scrud-db
//!
//! libSQL record store for Scrud: students, teachers, courses, and the
//! enrollments joining them.
//!
//! All reads and writes go through [`service::ScrudService`]. Every successful
//! write is announced on the service's change feed, and [`live::Live`]
//! snapshots re-run their queries when an entity type they depend on changes.
//! [`views`] wires those snapshots to the grade and availability derivations
//! in `scrud-core`.

pub mod credentials;
pub mod error;
pub mod helpers;
pub mod live;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;
pub mod views;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use error::StoreError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single shared connection. Cloning is cheap
/// and every clone talks to the same store.
#[derive(Clone)]
pub struct ScrudDb {
    #[allow(dead_code)]
    db: Arc<libsql::Database>,
    conn: libsql::Connection,
}

impl ScrudDb {
    /// Open a local database at the given path. `":memory:"` opens a
    /// throwaway store.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        // Readers wait out another process's commit instead of failing.
        conn.query("PRAGMA busy_timeout = 5000", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let scrud_db = Self {
            db: Arc::new(db),
            conn,
        };
        scrud_db.run_migrations().await?;
        tracing::debug!(path, "opened local store");
        Ok(scrud_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// SQLite's `data_version` for this connection. It changes whenever
    /// another connection commits, and never for this connection's own writes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the pragma cannot be read.
    pub async fn data_version(&self) -> Result<i64, StoreError> {
        let mut rows = self.conn.query("PRAGMA data_version", ()).await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"stu-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
