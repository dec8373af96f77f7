//! Storage layer for NovelKeep.
//!
//! The backup engine never talks to SQLite directly: it goes through the
//! [`StoreReader`], [`StoreWriter`], and [`SettingsStore`] traits so tests
//! (and alternative backends) can substitute fakes. [`SqliteStorage`] is the
//! production implementation of all three.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStorage;

use crate::error::Result;
use crate::model::{
    AppSettings, BookmarkRecord, HistoryRecord, LibraryRecord, ReadChapterRecord, ReaderSettings,
    ReadingStatsRecord, ReadingStreakRecord,
};

/// Read access to the live collections, one call per entity kind.
pub trait StoreReader {
    fn library(&self) -> Result<Vec<LibraryRecord>>;
    fn get_library(&self, url: &str) -> Result<Option<LibraryRecord>>;
    fn bookmarks(&self) -> Result<Vec<BookmarkRecord>>;
    fn history(&self) -> Result<Vec<HistoryRecord>>;
    fn get_history(&self, novel_url: &str) -> Result<Option<HistoryRecord>>;
    fn read_chapters(&self) -> Result<Vec<ReadChapterRecord>>;
    fn reading_stats(&self) -> Result<Vec<ReadingStatsRecord>>;
    fn reading_streak(&self) -> Result<Option<ReadingStreakRecord>>;
}

/// Write access to the live collections.
///
/// All inserts are upserts by natural key except bookmarks, which have none
/// and are always appended.
pub trait StoreWriter {
    fn upsert_library(&mut self, record: &LibraryRecord) -> Result<()>;
    fn insert_bookmark(&mut self, record: &BookmarkRecord) -> Result<()>;
    fn upsert_history(&mut self, record: &HistoryRecord) -> Result<()>;
    fn upsert_read_chapter(&mut self, record: &ReadChapterRecord) -> Result<()>;
    fn upsert_reading_stat(&mut self, record: &ReadingStatsRecord) -> Result<()>;
    fn set_reading_streak(&mut self, record: &ReadingStreakRecord) -> Result<()>;
    fn clear_library(&mut self) -> Result<()>;
    fn clear_bookmarks(&mut self) -> Result<()>;
    fn clear_history(&mut self) -> Result<()>;
    fn clear_read_chapters_for(&mut self, novel_url: &str) -> Result<()>;
    fn clear_reading_stats(&mut self) -> Result<()>;
}

/// Settings persistence. Whole-blob reads and writes; field-level merge is
/// never attempted.
pub trait SettingsStore {
    fn app_settings(&self) -> Result<Option<AppSettings>>;
    fn set_app_settings(&mut self, settings: &AppSettings) -> Result<()>;
    fn reader_settings(&self) -> Result<Option<ReaderSettings>>;
    fn set_reader_settings(&mut self, settings: &ReaderSettings) -> Result<()>;
}
