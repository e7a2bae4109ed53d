use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

pub const REDACTED: &str = "[redacted]";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result history is disabled")]
    Disabled,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,
}

/// One stored operation. `action` is encrypt, decrypt, hash or simulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationRecord {
    pub algorithm: String,
    pub action: String,
    pub input_text: String,
    pub output_text: String,
    pub timestamp: DateTime<Utc>,
}

impl SimulationRecord {
    /// bcrypt inputs are passwords and are never stored.
    pub fn new(algorithm: &str, action: &str, input_text: &str, output_text: &str) -> Self {
        let input_text = if algorithm == "bcrypt" { REDACTED } else { input_text };
        SimulationRecord {
            algorithm: algorithm.to_string(),
            action: action.to_string(),
            input_text: input_text.to_string(),
            output_text: output_text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Destination of finished operations.
pub trait ResultSink: Send + Sync {
    fn save(&self, record: &SimulationRecord) -> Result<(), StoreError>;

    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<SimulationRecord>, StoreError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        execute_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}

fn execute_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            algorithm TEXT NOT NULL,
            action TEXT NOT NULL,
            input_text TEXT NOT NULL,
            output_text TEXT NOT NULL,
            timestamp_secs INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}

impl ResultSink for SqliteStore {
    fn save(&self, record: &SimulationRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO results (algorithm, action, input_text, output_text, timestamp_secs)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.algorithm,
                record.action,
                record.input_text,
                record.output_text,
                record.timestamp.timestamp(),
            ],
        )?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<SimulationRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT algorithm, action, input_text, output_text, timestamp_secs
             FROM results ORDER BY id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            let timestamp_secs: i64 = row.get(4)?;
            Ok(SimulationRecord {
                algorithm: row.get(0)?,
                action: row.get(1)?,
                input_text: row.get(2)?,
                output_text: row.get(3)?,
                timestamp: DateTime::<Utc>::from_timestamp(timestamp_secs, 0).unwrap_or_else(Utc::now),
            })
        })?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

/// Stand-in when no database is configured or it failed to open.
#[derive(Debug, Default)]
pub struct DisabledStore;

impl ResultSink for DisabledStore {
    fn save(&self, _record: &SimulationRecord) -> Result<(), StoreError> {
        Err(StoreError::Disabled)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<SimulationRecord>, StoreError> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
