//! Database schema definitions.

use rusqlite::{Connection, Result};

/// The complete SQL schema for the NovelKeep database.
///
/// Timestamps are stored as INTEGER (Unix milliseconds). Stats dates are
/// `YYYY-MM-DD` strings, which sort correctly as TEXT.
pub const SCHEMA_SQL: &str = r#"
-- Library: novels the user follows
CREATE TABLE IF NOT EXISTS library (
    url TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    cover_url TEXT NOT NULL DEFAULT '',
    provider TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'reading',
    last_chapter TEXT NOT NULL DEFAULT '',
    last_read_at INTEGER,
    scroll_position REAL NOT NULL DEFAULT 0,
    total_chapters INTEGER NOT NULL DEFAULT 0,
    acknowledged_chapters INTEGER NOT NULL DEFAULT 0,
    unread_chapters INTEGER NOT NULL DEFAULT 0,
    added_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_library_status ON library(status);
CREATE INDEX IF NOT EXISTS idx_library_last_read ON library(last_read_at);

-- Bookmarks: no natural key, rowid only
CREATE TABLE IF NOT EXISTS bookmarks (
    novel_url TEXT NOT NULL,
    chapter_url TEXT NOT NULL,
    snippet TEXT,
    note TEXT,
    category TEXT,
    color TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_novel ON bookmarks(novel_url);

-- History: one row per novel
CREATE TABLE IF NOT EXISTS history (
    novel_url TEXT PRIMARY KEY,
    chapter_url TEXT NOT NULL DEFAULT '',
    chapter_title TEXT NOT NULL DEFAULT '',
    provider TEXT NOT NULL DEFAULT '',
    read_at INTEGER NOT NULL DEFAULT 0
);

-- Read chapters: per-chapter read markers
CREATE TABLE IF NOT EXISTS read_chapters (
    novel_url TEXT NOT NULL,
    chapter_url TEXT NOT NULL,
    read_at INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (novel_url, chapter_url)
);

CREATE INDEX IF NOT EXISTS idx_read_chapters_novel ON read_chapters(novel_url);

-- Daily reading statistics
CREATE TABLE IF NOT EXISTS reading_stats (
    novel_url TEXT NOT NULL,
    date TEXT NOT NULL,
    seconds_read INTEGER NOT NULL DEFAULT 0,
    chapters_read INTEGER NOT NULL DEFAULT 0,
    words_read INTEGER NOT NULL DEFAULT 0,
    session_count INTEGER NOT NULL DEFAULT 0,
    longest_session_seconds INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (novel_url, date)
);

CREATE INDEX IF NOT EXISTS idx_reading_stats_date ON reading_stats(date);

-- Settings: JSON blobs keyed by name ('app', 'reader', 'streak')
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Apply the schema to a connection. Idempotent.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
