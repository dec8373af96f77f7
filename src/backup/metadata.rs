//! Backup metadata extraction.
//!
//! Lets the UI preview a backup before committing to a restore. Native files
//! are fully decoded; foreign files are fully converted, since per-category
//! counts require the same reconstruction work either way. The store is
//! never touched.

use serde::Serialize;

use crate::backup::{codec, detect, foreign};
use crate::error::Result;

/// Summary of a backup file's contents.
#[derive(Debug, Clone, Serialize)]
pub struct BackupMetadata {
    /// Schema version carried by the file (native) or stamped during
    /// conversion (foreign).
    pub schema_version: u32,
    /// Export timestamp (Unix milliseconds).
    pub created_at: i64,
    /// Whether the file was a foreign export.
    pub is_foreign: bool,
    pub library: usize,
    pub bookmarks: usize,
    pub history: usize,
    pub read_chapters: usize,
    pub reading_stats: usize,
    pub has_streak: bool,
    pub has_app_settings: bool,
    pub has_reader_settings: bool,
}

impl BackupMetadata {
    /// Total record count across all categories.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.library + self.bookmarks + self.history + self.read_chapters + self.reading_stats
    }
}

/// Inspect raw backup bytes without applying them.
///
/// # Errors
///
/// Returns `Error::Format` if the bytes parse as neither schema.
pub fn inspect(bytes: &[u8]) -> Result<BackupMetadata> {
    let is_foreign = detect::is_foreign(bytes);
    let document = if is_foreign {
        foreign::convert(bytes)?
    } else {
        codec::decode(bytes)?
    };

    Ok(BackupMetadata {
        schema_version: document.schema_version,
        created_at: document.created_at,
        is_foreign,
        library: document.library.len(),
        bookmarks: document.bookmarks.len(),
        history: document.history.len(),
        read_chapters: document.read_chapters.len(),
        reading_stats: document.reading_stats.len(),
        has_streak: document.reading_streak.is_some(),
        has_app_settings: document.app_settings.is_some(),
        has_reader_settings: document.reader_settings.is_some(),
    })
}
