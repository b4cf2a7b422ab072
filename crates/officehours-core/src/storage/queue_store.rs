//! SQLite-backed queue persistence.
//!
//! One table, one row per queued name, in queue order:
//!
//! ```text
//! students(id INTEGER PRIMARY KEY, name TEXT NOT NULL, seconds INTEGER NOT NULL)
//! ```
//!
//! Every row carries the same `seconds` value: the countdown of the meeting
//! in progress when the queue was saved. It is not a per-person value.
//!
//! The store opens a fresh connection per call and is cheap to clone, so a
//! save can run on a blocking worker with its own copy.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::timer::QueueSnapshot;

/// Queue as read back from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQueue {
    pub names: Vec<String>,
    /// Shared countdown value, `None` when the table has no rows.
    pub seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    /// Store at `~/.config/officehours/queue.db`.
    pub fn open_default() -> Result<Self, CoreError> {
        Ok(Self::at(data_dir()?.join("queue.db")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored queue.
    ///
    /// Returns `Ok(None)` when no queue has ever been stored; the schema is
    /// created in that case so later saves find it.
    pub fn load(&self) -> Result<Option<StoredQueue>, DatabaseError> {
        let conn = self.connect()?;
        if !table_exists(&conn)? {
            bootstrap(&conn)?;
            tracing::info!(path = %self.path.display(), "created queue table");
            return Ok(None);
        }

        let mut stmt = conn.prepare("SELECT name, seconds FROM students ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?;

        let mut names = Vec::new();
        let mut seconds = None;
        for row in rows {
            let (name, row_seconds) = row?;
            seconds.get_or_insert(row_seconds);
            names.push(name);
        }
        Ok(Some(StoredQueue { names, seconds }))
    }

    /// Replace everything stored with `snapshot`, in one transaction.
    pub fn save(&self, snapshot: &QueueSnapshot) -> Result<(), DatabaseError> {
        let mut conn = self.connect()?;
        bootstrap(&conn)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM students", [])?;
        {
            let mut insert = tx.prepare("INSERT INTO students (name, seconds) VALUES (?1, ?2)")?;
            for name in &snapshot.names {
                insert.execute(params![name, snapshot.seconds])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Remove every stored row.
    pub fn clear(&self) -> Result<(), DatabaseError> {
        let conn = self.connect()?;
        bootstrap(&conn)?;
        conn.execute("DELETE FROM students", [])?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        Connection::open(&self.path).map_err(|source| DatabaseError::OpenFailed {
            path: self.path.clone(),
            source,
        })
    }
}

fn table_exists(conn: &Connection) -> Result<bool, rusqlite::Error> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'students'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn bootstrap(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS students (
            id      INTEGER PRIMARY KEY,
            name    TEXT NOT NULL,
            seconds INTEGER NOT NULL
        );",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, QueueStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = QueueStore::at(dir.path().join("queue.db"));
        (dir, store)
    }

    #[test]
    fn missing_store_is_not_found_then_empty() {
        let (_dir, store) = store();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(
            store.load().unwrap(),
            Some(StoredQueue {
                names: vec![],
                seconds: None
            })
        );
    }

    #[test]
    fn save_then_load_keeps_order_and_seconds() {
        let (_dir, store) = store();
        let snapshot = QueueSnapshot {
            names: vec!["Carol".into(), "Alice".into(), "Bob".into()],
            seconds: 321,
        };
        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.names, snapshot.names);
        assert_eq!(loaded.seconds, Some(321));
    }

    #[test]
    fn save_replaces_previous_rows() {
        let (_dir, store) = store();
        store
            .save(&QueueSnapshot {
                names: vec!["a".into(), "b".into()],
                seconds: 5,
            })
            .unwrap();
        store
            .save(&QueueSnapshot {
                names: vec!["c".into()],
                seconds: 9,
            })
            .unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.names, vec!["c"]);
        assert_eq!(loaded.seconds, Some(9));
    }

    #[test]
    fn every_row_shares_the_countdown() {
        let (_dir, store) = store();
        store
            .save(&QueueSnapshot {
                names: vec!["a".into(), "b".into(), "c".into()],
                seconds: 77,
            })
            .unwrap();
        let conn = Connection::open(store.path()).unwrap();
        let distinct: i64 = conn
            .query_row("SELECT COUNT(DISTINCT seconds) FROM students", [], |r| r.get(0))
            .unwrap();
        assert_eq!(distinct, 1);
    }

    #[test]
    fn clear_empties_store() {
        let (_dir, store) = store();
        store
            .save(&QueueSnapshot {
                names: vec!["a".into()],
                seconds: 1,
            })
            .unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap().unwrap().names, Vec::<String>::new());
    }

    #[test]
    fn unopenable_path_reports_open_failed() {
        let dir = tempfile::tempdir().unwrap();
        let store = QueueStore::at(dir.path().join("missing").join("queue.db"));
        assert!(matches!(
            store.load(),
            Err(DatabaseError::OpenFailed { .. })
        ));
    }
}
