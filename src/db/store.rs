//! SQLite persistence for cat records.
//!
//! The store keeps one long-lived connection behind a mutex; in-memory
//! databases are per-connection in SQLite, so tests get a fresh disposable
//! database from [`CatStore::in_memory`]. Timestamps are stored as RFC 3339
//! text at nanosecond precision.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::db::cat::{Cat, CatId, SPLOTCH_ID};

/// Errors from cat storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No cat with the requested id exists.
    #[error("no cat with id {id:?}")]
    NotFound { id: String },

    /// A stored timestamp failed to parse back.
    #[error("stored timestamp for cat {id:?} is malformed")]
    MalformedTimestamp {
        id: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Underlying SQLite error.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// SQLite-backed storage for cat records.
pub struct CatStore {
    conn: Mutex<Connection>,
}

impl CatStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).inspect_err(|e| {
            log::error!("Failed to open cat database: {e}");
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a disposable in-memory database.
    ///
    /// Each call returns a distinct database, dropped with the store. See
    /// <https://www.sqlite.org/inmemorydb.html>.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    /// Bootstraps database state.
    ///
    /// Applies the schema and seeds the initial record for Splotch with a
    /// single pat at `now` if it is missing. Idempotent: does nothing on an
    /// already set up database.
    pub fn bootstrap(&self, now: DateTime<Utc>) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cats (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                pats INTEGER NOT NULL,
                latest_pat TEXT NOT NULL
            )",
            [],
        )?;

        let splotch = CatId::new(SPLOTCH_ID);
        conn.execute(
            "INSERT OR IGNORE INTO cats (id, name, pats, latest_pat)
             VALUES (?1, ?2, 1, ?3)",
            params![
                splotch.as_str(),
                splotch.display_name(),
                encode_time(now)
            ],
        )?;
        Ok(())
    }

    /// Queries the cat with the given id.
    pub fn cat_by_id(&self, id: &CatId) -> Result<Cat, StoreError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT id, name, pats, latest_pat FROM cats WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, pats, latest_pat)) = row else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };
        let latest_pat = decode_time(&latest_pat).map_err(|source| {
            log::error!("Malformed latest_pat for cat {id:?}: {source}");
            StoreError::MalformedTimestamp {
                id: id.clone(),
                source,
            }
        })?;
        Ok(Cat {
            id: CatId::new(id),
            name,
            pats: pats as u64,
            latest_pat,
        })
    }

    /// Records a new pat for the given cat at time `now`.
    ///
    /// Increments the pat counter and stamps `latest_pat` in one statement.
    pub fn record_pat(&self, id: &CatId, now: DateTime<Utc>) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let affected = conn.execute(
            "UPDATE cats SET pats = pats + 1, latest_pat = ?1 WHERE id = ?2",
            params![encode_time(now), id.as_str()],
        )?;
        if affected != 1 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}

fn encode_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}
