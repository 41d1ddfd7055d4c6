//! Note store — SQLite-backed persistence for `Note` records.
//!
//! A single connection is shared behind a mutex; every operation holds the
//! lock for one statement, so inserts and deletes are atomic per call.

use notes_types::{NewNote, Note};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("failed to open note store at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("note store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the store at `url` and make sure the schema exists.
    pub fn new(url: &str) -> StoreResult<Self> {
        let conn = open_connection(url)
            .and_then(|conn| {
                // Opening is lazy; an unusable file only shows up here
                conn.execute_batch(
                    "CREATE TABLE IF NOT EXISTS notes (
                        seq INTEGER PRIMARY KEY AUTOINCREMENT,
                        id TEXT NOT NULL UNIQUE,
                        content TEXT NOT NULL,
                        important INTEGER NOT NULL DEFAULT 0
                    );",
                )?;
                Ok(conn)
            })
            .map_err(|source| StoreError::Connection {
                url: url.to_string(),
                source,
            })?;

        log::debug!("[NOTES] Store ready at {}", url);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Persist a new note. `content` must be present and not blank;
    /// `important` defaults to false.
    pub fn insert_note(&self, new_note: &NewNote) -> StoreResult<Note> {
        let content = match new_note.content.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            Some(_) => return Err(StoreError::Validation("content is empty".to_string())),
            None => return Err(StoreError::Validation("content missing".to_string())),
        };

        let note = Note {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            important: new_note.important.unwrap_or(false),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO notes (id, content, important) VALUES (?1, ?2, ?3)",
            params![note.id, note.content, note.important],
        )?;

        log::debug!("[NOTES] Inserted note {}", note.id);
        Ok(note)
    }

    /// All notes, oldest first.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, content, important FROM notes ORDER BY seq")?;

        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// Look a note up by id. Ids that aren't UUIDs simply don't match.
    pub fn get_note(&self, id: &str) -> StoreResult<Option<Note>> {
        let Some(id) = normalize_id(id) else {
            return Ok(None);
        };

        let conn = self.conn()?;
        let note = conn
            .query_row(
                "SELECT id, content, important FROM notes WHERE id = ?1",
                params![id],
                row_to_note,
            )
            .optional()?;

        Ok(note)
    }

    /// Remove a note. Returns whether a row was deleted; an absent or
    /// malformed id is a no-op, not an error.
    pub fn delete_note(&self, id: &str) -> StoreResult<bool> {
        let Some(id) = normalize_id(id) else {
            return Ok(false);
        };

        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        if rows_affected > 0 {
            log::debug!("[NOTES] Deleted note {}", id);
        }
        Ok(rows_affected > 0)
    }

    pub fn count_notes(&self) -> StoreResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn open_connection(url: &str) -> rusqlite::Result<Connection> {
    let path = url.strip_prefix("sqlite://").unwrap_or(url);

    if path == ":memory:" {
        return Connection::open_in_memory();
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!(
                    "[NOTES] Could not create directory {}: {}",
                    parent.display(),
                    e
                );
            }
        }
    }

    Connection::open(path)
}

fn normalize_id(id: &str) -> Option<String> {
    Uuid::parse_str(id).ok().map(|u| u.to_string())
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        content: row.get(1)?,
        important: row.get(2)?,
    })
}
