//! Result sink
//!
//! Persists finished reports. The sink is fire-and-forget from the
//! pipeline's point of view: a storage failure is logged and the verdict
//! is still returned to the caller.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection};

use super::detect::types::{EmailReport, UrlReport};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoreError: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

// ============================================================================
// SINK TRAIT
// ============================================================================

/// Result store collaborator interface.
pub trait ResultSink {
    fn store_url(&self, report: &UrlReport) -> Result<(), StoreError>;
    fn store_email(&self, report: &EmailReport) -> Result<(), StoreError>;
}

// ============================================================================
// SQLITE SINK
// ============================================================================

/// SQLite-backed sink. Records are stored as the flat display-name JSON
/// document plus a few queryable columns.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS url_results (
                 id TEXT PRIMARY KEY,
                 url TEXT NOT NULL,
                 verdict_value INTEGER NOT NULL,
                 label TEXT NOT NULL,
                 record TEXT NOT NULL,
                 created_at TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS email_results (
                 id TEXT PRIMARY KEY,
                 email_address TEXT NOT NULL,
                 verdict_value INTEGER NOT NULL,
                 label TEXT NOT NULL,
                 record TEXT NOT NULL,
                 created_at TEXT NOT NULL
             );",
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn url_count(&self) -> Result<i64, StoreError> {
        self.conn
            .lock()
            .query_row("SELECT COUNT(*) FROM url_results", [], |row| row.get(0))
            .map_err(|e| StoreError(e.to_string()))
    }

    pub fn email_count(&self) -> Result<i64, StoreError> {
        self.conn
            .lock()
            .query_row("SELECT COUNT(*) FROM email_results", [], |row| row.get(0))
            .map_err(|e| StoreError(e.to_string()))
    }
}

impl ResultSink for SqliteSink {
    fn store_url(&self, report: &UrlReport) -> Result<(), StoreError> {
        let record = serde_json::Value::Object(report.to_display_map()).to_string();
        self.conn
            .lock()
            .execute(
                "INSERT INTO url_results (id, url, verdict_value, label, record, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    report.id.to_string(),
                    report.url,
                    report.verdict_value,
                    report.verdict.as_str(),
                    record,
                    report.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    fn store_email(&self, report: &EmailReport) -> Result<(), StoreError> {
        let record = serde_json::Value::Object(report.to_display_map()).to_string();
        self.conn
            .lock()
            .execute(
                "INSERT INTO email_results (id, email_address, verdict_value, label, record, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    report.id.to_string(),
                    report.email_address,
                    report.verdict_value,
                    report.verdict.as_str(),
                    record,
                    report.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
