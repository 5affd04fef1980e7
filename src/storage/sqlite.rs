use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TaskmanError;
use crate::storage::slot::Slot;

/// Key under which the whole task collection lives.
const SLOT_KEY: &str = "task-manager-v1";

const DATA_DIR: &str = ".taskman";
const DB_FILE: &str = "tasks.db";

/// Production slot: one row in a one-table SQLite database.
pub struct SqliteSlot {
    conn: Connection,
}

/// Database location for the current working directory: the nearest
/// ancestor that already has a `.taskman/` directory wins, so nested
/// working directories share one list; otherwise the current directory
/// gets a fresh one.
pub fn default_db_path() -> Result<PathBuf, TaskmanError> {
    let start = env::current_dir().map_err(|e| TaskmanError::storage(e.to_string()))?;
    let mut dir = start.clone();
    loop {
        if dir.join(DATA_DIR).is_dir() {
            return Ok(dir.join(DATA_DIR).join(DB_FILE));
        }
        if !dir.pop() {
            return Ok(start.join(DATA_DIR).join(DB_FILE));
        }
    }
}

impl SqliteSlot {
    /// Opens the slot database at `path`, creating the file and schema on
    /// first use. An absent database is the same as an empty slot.
    pub fn open(path: &Path) -> Result<Self, TaskmanError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TaskmanError::storage(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             CREATE TABLE IF NOT EXISTS slots (
                 key TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn })
    }

    /// Opens the slot database for the current working directory.
    pub fn open_default() -> Result<Self, TaskmanError> {
        Self::open(&default_db_path()?)
    }
}

impl Slot for SqliteSlot {
    fn read(&mut self) -> Result<Option<String>, TaskmanError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![SLOT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, value: &str) -> Result<(), TaskmanError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
            params![SLOT_KEY, value],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TaskmanError> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1", params![SLOT_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn slot_in(dir: &TempDir) -> SqliteSlot {
        SqliteSlot::open(&dir.path().join(DATA_DIR).join(DB_FILE)).expect("open slot")
    }

    #[test]
    fn absent_slot_reads_none() {
        let dir = TempDir::new().unwrap();
        let mut slot = slot_in(&dir);
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn write_read_clear_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut slot = slot_in(&dir);
        slot.write("[1,2,3]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1,2,3]"));
        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn value_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut slot = slot_in(&dir);
            slot.write("persisted").unwrap();
        }
        let mut slot = slot_in(&dir);
        assert_eq!(slot.read().unwrap().as_deref(), Some("persisted"));
    }
}
