//! SQLite-backed journal store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::entry::{resolve_new, JournalEntry, JournalEntryUpdate, JournalFilter, NewJournalEntry};
use crate::stats::{compute_stats, JournalStats};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid entry: {0}")]
    Invalid(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

const COLUMNS: &str = "id, title, description, date, mood, tags, favorite, interpretation, \
                       visualization, visualization_url, created_at, updated_at";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let tags_json: String = row.get(5)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    Ok(JournalEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        mood: row.get(4)?,
        tags,
        favorite: row.get(6)?,
        interpretation: row.get(7)?,
        visualization: row.get(8)?,
        visualization_url: row.get(9)?,
        created_at_ms: row.get(10)?,
        updated_at_ms: row.get(11)?,
    })
}

fn tags_to_json(tags: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(tags).map_err(|e| StoreError::Storage(e.to_string()))
}

fn require_description(description: &str) -> Result<(), StoreError> {
    if description.trim().is_empty() {
        return Err(StoreError::Invalid("description must not be empty".into()));
    }
    Ok(())
}

/// Escapes `%`, `_` and the escape char itself for `LIKE ... ESCAPE '\'`.
fn like_pattern(q: &str) -> String {
    let mut out = String::with_capacity(q.len() + 2);
    out.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn get_locked(conn: &rusqlite::Connection, id: &str) -> Result<JournalEntry, StoreError> {
    conn.query_row(
        &format!("SELECT {} FROM journal_entries WHERE id = ?1", COLUMNS),
        params![id],
        row_to_entry,
    )
    .optional()?
    .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// Journal store over one SQLite file. Async methods block the current worker via
/// `block_in_place`, so they need the multi-thread runtime.
pub struct Store {
    db: Arc<Mutex<rusqlite::Connection>>,
}

impl Store {
    /// Opens or creates the database and its table.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open(path.as_ref())?;
        Self::init(conn)
    }

    /// Private in-memory database; gone when the store is dropped.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(rusqlite::Connection::open_in_memory()?)
    }

    fn init(conn: rusqlite::Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                mood TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                favorite INTEGER NOT NULL DEFAULT 0,
                interpretation TEXT NOT NULL DEFAULT '',
                visualization TEXT NOT NULL DEFAULT '',
                visualization_url TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_journal_entries_created_at ON journal_entries(created_at);
            "#,
        )?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&rusqlite::Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let db = self.db.clone();
        tokio::task::block_in_place(|| {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            f(&conn)
        })
    }

    /// Saves a new entry, filling title, date and mood defaults.
    pub async fn add_entry(&self, new: NewJournalEntry) -> Result<JournalEntry, StoreError> {
        require_description(&new.description)?;
        let entry = resolve_new(new, uuid::Uuid::new_v4().to_string(), Utc::now());
        let tags = tags_to_json(&entry.tags)?;
        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO journal_entries ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    COLUMNS
                ),
                params![
                    entry.id,
                    entry.title,
                    entry.description,
                    entry.date,
                    entry.mood,
                    tags,
                    entry.favorite,
                    entry.interpretation,
                    entry.visualization,
                    entry.visualization_url,
                    entry.created_at_ms,
                    entry.updated_at_ms,
                ],
            )?;
            Ok(())
        })?;
        tracing::info!(id = %entry.id, title = %entry.title, "journal entry added");
        Ok(entry)
    }

    pub async fn get_entry(&self, id: &str) -> Result<JournalEntry, StoreError> {
        self.with_conn(|conn| get_locked(conn, id))
    }

    /// Entries matching `filter`, newest first.
    pub async fn list_entries(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>, StoreError> {
        let mut sql = format!("SELECT {} FROM journal_entries WHERE 1 = 1", COLUMNS);
        let mut args: Vec<String> = Vec::new();
        if let Some(mood) = non_blank(&filter.mood) {
            args.push(mood.to_string());
            sql.push_str(&format!(" AND mood = ?{} COLLATE NOCASE", args.len()));
        }
        if let Some(favorite) = filter.favorite {
            sql.push_str(if favorite { " AND favorite = 1" } else { " AND favorite = 0" });
        }
        if let Some(q) = non_blank(&filter.q) {
            args.push(like_pattern(q));
            let n = args.len();
            sql.push_str(&format!(
                " AND (title LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\')"
            ));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut entries = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args.iter()), row_to_entry)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })?;

        // Tags live in a JSON column; filter them here.
        if let Some(tag) = non_blank(&filter.tag) {
            entries.retain(|e| e.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)));
        }
        Ok(entries)
    }

    /// Applies `update` and bumps `updated_at_ms`.
    pub async fn update_entry(
        &self,
        id: &str,
        update: JournalEntryUpdate,
    ) -> Result<JournalEntry, StoreError> {
        let entry = self.with_conn(|conn| {
            let mut entry = get_locked(conn, id)?;
            update.apply(&mut entry);
            require_description(&entry.description)?;
            entry.updated_at_ms = Utc::now().timestamp_millis();
            conn.execute(
                "UPDATE journal_entries SET title = ?2, description = ?3, date = ?4, mood = ?5, tags = ?6, \
                 favorite = ?7, interpretation = ?8, visualization = ?9, visualization_url = ?10, \
                 updated_at = ?11 WHERE id = ?1",
                params![
                    entry.id,
                    entry.title,
                    entry.description,
                    entry.date,
                    entry.mood,
                    tags_to_json(&entry.tags)?,
                    entry.favorite,
                    entry.interpretation,
                    entry.visualization,
                    entry.visualization_url,
                    entry.updated_at_ms,
                ],
            )?;
            Ok(entry)
        })?;
        tracing::debug!(id, "journal entry updated");
        Ok(entry)
    }

    /// Flips `favorite` and returns the updated entry.
    pub async fn toggle_favorite(&self, id: &str) -> Result<JournalEntry, StoreError> {
        let now = Utc::now().timestamp_millis();
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE journal_entries SET favorite = NOT favorite, updated_at = ?2 WHERE id = ?1",
                params![id, now],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id.to_string()));
            }
            get_locked(conn, id)
        })
    }

    /// Attaches a generated image to an entry.
    pub async fn set_visualization_url(&self, id: &str, url: &str) -> Result<JournalEntry, StoreError> {
        self.update_entry(
            id,
            JournalEntryUpdate {
                visualization_url: Some(url.to_string()),
                ..JournalEntryUpdate::default()
            },
        )
        .await
    }

    /// Returns whether a row was deleted.
    pub async fn delete_entry(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM journal_entries WHERE id = ?1", params![id])? > 0)
        })?;
        if deleted {
            tracing::info!(id, "journal entry deleted");
        }
        Ok(deleted)
    }

    /// Dashboard statistics as of `now`.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<JournalStats, StoreError> {
        let entries = self.list_entries(&JournalFilter::default()).await?;
        Ok(compute_stats(&entries, now.date_naive()))
    }
}
