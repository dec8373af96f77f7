//! Snapshot builder: live store → document.

use tracing::debug;

use crate::error::Result;
use crate::model::Document;
use crate::storage::{SettingsStore, StoreReader};

/// Assemble a full snapshot of user state.
///
/// One read per entity kind, field mapping only. The document is stamped
/// with the current schema version and timestamp.
///
/// # Errors
///
/// Returns an error if any store read fails. Nothing is written anywhere.
pub fn build_snapshot<R, S>(reader: &R, settings: &S, device_info: &str) -> Result<Document>
where
    R: StoreReader,
    S: SettingsStore,
{
    let mut document = Document::new(env!("CARGO_PKG_VERSION"), device_info);
    document.library = reader.library()?;
    document.bookmarks = reader.bookmarks()?;
    document.history = reader.history()?;
    document.read_chapters = reader.read_chapters()?;
    document.reading_stats = reader.reading_stats()?;
    document.reading_streak = reader.reading_streak()?;
    document.app_settings = settings.app_settings()?;
    document.reader_settings = settings.reader_settings()?;

    debug!(
        library = document.library.len(),
        bookmarks = document.bookmarks.len(),
        history = document.history.len(),
        read_chapters = document.read_chapters.len(),
        stats = document.reading_stats.len(),
        "snapshot assembled"
    );
    Ok(document)
}
