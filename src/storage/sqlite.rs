//! SQLite storage implementation.
//!
//! Production backend for the store traits. Opens in WAL mode with a busy
//! timeout; tests use [`SqliteStorage::open_memory`].

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;
use crate::model::{
    AppSettings, BookmarkRecord, HistoryRecord, LibraryRecord, ReadChapterRecord, ReaderSettings,
    ReadingStatsRecord, ReadingStatus, ReadingStreakRecord,
};
use crate::storage::schema::apply_schema;
use crate::storage::{SettingsStore, StoreReader, StoreWriter};

const KEY_APP_SETTINGS: &str = "app";
const KEY_READER_SETTINGS: &str = "reader";
const KEY_STREAK: &str = "streak";

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema fails to apply.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Reference to the underlying connection, for ad hoc queries.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn settings_blob(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_settings_blob(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn library_from_row(row: &Row<'_>) -> rusqlite::Result<LibraryRecord> {
    Ok(LibraryRecord {
        url: row.get("url")?,
        name: row.get("name")?,
        cover_url: row.get("cover_url")?,
        provider: row.get("provider")?,
        status: ReadingStatus::parse(&row.get::<_, String>("status")?),
        last_chapter: row.get("last_chapter")?,
        last_read_at: row.get("last_read_at")?,
        scroll_position: row.get::<_, f64>("scroll_position")? as f32,
        total_chapters: row.get::<_, i64>("total_chapters")? as u32,
        acknowledged_chapters: row.get::<_, i64>("acknowledged_chapters")? as u32,
        unread_chapters: row.get::<_, i64>("unread_chapters")? as u32,
        added_at: row.get("added_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn bookmark_from_row(row: &Row<'_>) -> rusqlite::Result<BookmarkRecord> {
    Ok(BookmarkRecord {
        novel_url: row.get("novel_url")?,
        chapter_url: row.get("chapter_url")?,
        snippet: row.get("snippet")?,
        note: row.get("note")?,
        category: row.get("category")?,
        color: row.get("color")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn history_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        novel_url: row.get("novel_url")?,
        chapter_url: row.get("chapter_url")?,
        chapter_title: row.get("chapter_title")?,
        provider: row.get("provider")?,
        read_at: row.get("read_at")?,
    })
}

fn stat_from_row(row: &Row<'_>) -> rusqlite::Result<ReadingStatsRecord> {
    Ok(ReadingStatsRecord {
        novel_url: row.get("novel_url")?,
        date: row.get("date")?,
        seconds_read: row.get::<_, i64>("seconds_read")? as u64,
        chapters_read: row.get::<_, i64>("chapters_read")? as u32,
        words_read: row.get::<_, i64>("words_read")? as u64,
        session_count: row.get::<_, i64>("session_count")? as u32,
        longest_session_seconds: row.get::<_, i64>("longest_session_seconds")? as u64,
    })
}

impl StoreReader for SqliteStorage {
    fn library(&self) -> Result<Vec<LibraryRecord>> {
        let mut stmt = self.conn.prepare("SELECT * FROM library ORDER BY url")?;
        let rows = stmt.query_map([], library_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_library(&self, url: &str) -> Result<Option<LibraryRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT * FROM library WHERE url = ?1",
                params![url],
                library_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn bookmarks(&self) -> Result<Vec<BookmarkRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM bookmarks ORDER BY created_at, rowid")?;
        let rows = stmt.query_map([], bookmark_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn history(&self) -> Result<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare("SELECT * FROM history ORDER BY novel_url")?;
        let rows = stmt.query_map([], history_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_history(&self, novel_url: &str) -> Result<Option<HistoryRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT * FROM history WHERE novel_url = ?1",
                params![novel_url],
                history_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn read_chapters(&self) -> Result<Vec<ReadChapterRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM read_chapters ORDER BY novel_url, chapter_url")?;
        let rows = stmt.query_map([], |row| {
            Ok(ReadChapterRecord {
                novel_url: row.get("novel_url")?,
                chapter_url: row.get("chapter_url")?,
                read_at: row.get("read_at")?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn reading_stats(&self) -> Result<Vec<ReadingStatsRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM reading_stats ORDER BY novel_url, date")?;
        let rows = stmt.query_map([], stat_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn reading_streak(&self) -> Result<Option<ReadingStreakRecord>> {
        match self.settings_blob(KEY_STREAK)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl StoreWriter for SqliteStorage {
    fn upsert_library(&mut self, record: &LibraryRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO library (url, name, cover_url, provider, status, last_chapter,
                 last_read_at, scroll_position, total_chapters, acknowledged_chapters,
                 unread_chapters, added_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(url) DO UPDATE SET
                 name = excluded.name,
                 cover_url = excluded.cover_url,
                 provider = excluded.provider,
                 status = excluded.status,
                 last_chapter = excluded.last_chapter,
                 last_read_at = excluded.last_read_at,
                 scroll_position = excluded.scroll_position,
                 total_chapters = excluded.total_chapters,
                 acknowledged_chapters = excluded.acknowledged_chapters,
                 unread_chapters = excluded.unread_chapters,
                 added_at = excluded.added_at,
                 updated_at = excluded.updated_at",
            params![
                record.url,
                record.name,
                record.cover_url,
                record.provider,
                record.status.as_str(),
                record.last_chapter,
                record.last_read_at,
                f64::from(record.scroll_position),
                i64::from(record.total_chapters),
                i64::from(record.acknowledged_chapters),
                i64::from(record.unread_chapters),
                record.added_at,
                record.updated_at,
            ],
        )?;
        Ok(())
    }

    fn insert_bookmark(&mut self, record: &BookmarkRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO bookmarks (novel_url, chapter_url, snippet, note, category, color,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.novel_url,
                record.chapter_url,
                record.snippet,
                record.note,
                record.category,
                record.color,
                record.created_at,
                record.updated_at,
            ],
        )?;
        Ok(())
    }

    fn upsert_history(&mut self, record: &HistoryRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO history (novel_url, chapter_url, chapter_title, provider, read_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(novel_url) DO UPDATE SET
                 chapter_url = excluded.chapter_url,
                 chapter_title = excluded.chapter_title,
                 provider = excluded.provider,
                 read_at = excluded.read_at",
            params![
                record.novel_url,
                record.chapter_url,
                record.chapter_title,
                record.provider,
                record.read_at,
            ],
        )?;
        Ok(())
    }

    fn upsert_read_chapter(&mut self, record: &ReadChapterRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO read_chapters (novel_url, chapter_url, read_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(novel_url, chapter_url) DO UPDATE SET read_at = excluded.read_at",
            params![record.novel_url, record.chapter_url, record.read_at],
        )?;
        Ok(())
    }

    fn upsert_reading_stat(&mut self, record: &ReadingStatsRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO reading_stats (novel_url, date, seconds_read, chapters_read,
                 words_read, session_count, longest_session_seconds)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(novel_url, date) DO UPDATE SET
                 seconds_read = excluded.seconds_read,
                 chapters_read = excluded.chapters_read,
                 words_read = excluded.words_read,
                 session_count = excluded.session_count,
                 longest_session_seconds = excluded.longest_session_seconds",
            params![
                record.novel_url,
                record.date,
                record.seconds_read as i64,
                i64::from(record.chapters_read),
                record.words_read as i64,
                i64::from(record.session_count),
                record.longest_session_seconds as i64,
            ],
        )?;
        Ok(())
    }

    fn set_reading_streak(&mut self, record: &ReadingStreakRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.set_settings_blob(KEY_STREAK, &json)
    }

    fn clear_library(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM library", [])?;
        Ok(())
    }

    fn clear_bookmarks(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM bookmarks", [])?;
        Ok(())
    }

    fn clear_history(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM history", [])?;
        Ok(())
    }

    fn clear_read_chapters_for(&mut self, novel_url: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM read_chapters WHERE novel_url = ?1",
            params![novel_url],
        )?;
        Ok(())
    }

    fn clear_reading_stats(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM reading_stats", [])?;
        self.conn.execute(
            "DELETE FROM settings WHERE key = ?1",
            params![KEY_STREAK],
        )?;
        Ok(())
    }
}

impl SettingsStore for SqliteStorage {
    fn app_settings(&self) -> Result<Option<AppSettings>> {
        match self.settings_blob(KEY_APP_SETTINGS)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set_app_settings(&mut self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.set_settings_blob(KEY_APP_SETTINGS, &json)
    }

    fn reader_settings(&self) -> Result<Option<ReaderSettings>> {
        match self.settings_blob(KEY_READER_SETTINGS)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set_reader_settings(&mut self, settings: &ReaderSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.set_settings_blob(KEY_READER_SETTINGS, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;

    fn novel(url: &str, last_read_at: Option<i64>) -> LibraryRecord {
        LibraryRecord {
            url: url.to_string(),
            name: "Test Novel".to_string(),
            provider: "NovelBin".to_string(),
            last_read_at,
            added_at: 1000,
            updated_at: 1000,
            ..LibraryRecord::default()
        }
    }

    #[test]
    fn test_library_upsert_round_trip() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let record = novel("http://x/n", Some(100));
        store.upsert_library(&record).unwrap();

        let loaded = store.get_library("http://x/n").unwrap().unwrap();
        assert_eq!(loaded, record);

        // Upsert with the same key replaces, not duplicates
        let mut updated = record.clone();
        updated.name = "Renamed".to_string();
        store.upsert_library(&updated).unwrap();
        assert_eq!(store.library().unwrap().len(), 1);
        assert_eq!(store.library().unwrap()[0].name, "Renamed");
    }

    #[test]
    fn test_history_single_row_per_novel() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store
            .upsert_history(&HistoryRecord {
                novel_url: "http://x/n".to_string(),
                chapter_url: "http://x/n/1".to_string(),
                read_at: 10,
                ..HistoryRecord::default()
            })
            .unwrap();
        store
            .upsert_history(&HistoryRecord {
                novel_url: "http://x/n".to_string(),
                chapter_url: "http://x/n/2".to_string(),
                read_at: 20,
                ..HistoryRecord::default()
            })
            .unwrap();

        let rows = store.history().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].chapter_url, "http://x/n/2");
    }

    #[test]
    fn test_read_chapter_upsert_idempotent() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let record = ReadChapterRecord {
            novel_url: "http://x/n".to_string(),
            chapter_url: "http://x/n#chapter-3".to_string(),
            read_at: 500,
        };
        store.upsert_read_chapter(&record).unwrap();
        store.upsert_read_chapter(&record).unwrap();
        assert_eq!(store.read_chapters().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_read_chapters_scoped_to_novel() {
        let mut store = SqliteStorage::open_memory().unwrap();
        for url in ["http://x/a", "http://x/b"] {
            store
                .upsert_read_chapter(&ReadChapterRecord {
                    novel_url: url.to_string(),
                    chapter_url: format!("{url}#chapter-1"),
                    read_at: 1,
                })
                .unwrap();
        }
        store.clear_read_chapters_for("http://x/a").unwrap();
        let remaining = store.read_chapters().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].novel_url, "http://x/b");
    }

    #[test]
    fn test_settings_blobs() {
        let mut store = SqliteStorage::open_memory().unwrap();
        assert!(store.app_settings().unwrap().is_none());

        let settings = AppSettings {
            theme: Theme::Amoled,
            ..AppSettings::default()
        };
        store.set_app_settings(&settings).unwrap();
        assert_eq!(store.app_settings().unwrap().unwrap(), settings);
    }

    #[test]
    fn test_streak_stored_as_singleton() {
        let mut store = SqliteStorage::open_memory().unwrap();
        assert!(store.reading_streak().unwrap().is_none());

        let streak = ReadingStreakRecord {
            current_streak: 3,
            longest_streak: 10,
            last_read_date: "2026-08-30".to_string(),
            total_days_read: 40,
            total_seconds_read: 3600,
        };
        store.set_reading_streak(&streak).unwrap();
        assert_eq!(store.reading_streak().unwrap().unwrap(), streak);

        store.clear_reading_stats().unwrap();
        assert!(store.reading_streak().unwrap().is_none());
    }
}
