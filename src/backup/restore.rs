//! Restore orchestrator.
//!
//! Applies a document to the live store under caller-supplied options.
//! Categories are processed in a fixed order: library → bookmarks →
//! history + read chapters → statistics + streak → settings. There is no
//! cross-category transaction: a failure mid-restore leaves earlier
//! categories committed and reports the counts applied so far.
//!
//! Restores against one store must not overlap. Within a process the
//! `&mut` store access enforces that; cross-process callers serialize
//! externally.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{CURRENT_VERSION, Document};
use crate::storage::{SettingsStore, StoreReader, StoreWriter};

/// Per-category enable flags for a restore.
///
/// `history` covers read-chapter markers; `stats` covers the streak
/// singleton. With `merge_with_existing` off, enabled categories are
/// cleared before the incoming rows are applied.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub library: bool,
    pub bookmarks: bool,
    pub history: bool,
    pub stats: bool,
    pub settings: bool,
    pub merge_with_existing: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            library: true,
            bookmarks: true,
            history: true,
            stats: true,
            settings: true,
            merge_with_existing: true,
        }
    }
}

/// Rows applied per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoreCounts {
    pub library: usize,
    pub bookmarks: usize,
    pub history: usize,
    pub read_chapters: usize,
    /// Stat rows plus the streak singleton when it was replaced.
    pub stats: usize,
    /// Settings blobs written (0–2).
    pub settings: usize,
}

impl RestoreCounts {
    /// Total rows applied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.library
            + self.bookmarks
            + self.history
            + self.read_chapters
            + self.stats
            + self.settings
    }
}

/// Outcome of a restore: a structured result, never a fault.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreResult {
    pub success: bool,
    pub error: Option<String>,
    pub counts: RestoreCounts,
}

impl RestoreResult {
    fn ok(counts: RestoreCounts) -> Self {
        Self {
            success: true,
            error: None,
            counts,
        }
    }

    fn failed(message: String, counts: RestoreCounts) -> Self {
        Self {
            success: false,
            error: Some(message),
            counts,
        }
    }
}

/// Apply a document to the store.
///
/// Native documents newer than [`CURRENT_VERSION`] are rejected before any
/// mutation; foreign-derived documents skip that gate since their version
/// never came from a NovelKeep build. Afterwards, enabled categories are
/// cleared if not merging, then applied in fixed order. The first error
/// aborts further categories but the result still carries the counts
/// committed up to that point.
pub fn restore<S>(document: &Document, options: &RestoreOptions, store: &mut S) -> RestoreResult
where
    S: StoreReader + StoreWriter + SettingsStore,
{
    if !document.is_foreign() && document.schema_version > CURRENT_VERSION {
        return RestoreResult::failed(
            format!(
                "backup schema version {} is newer than supported version {CURRENT_VERSION}",
                document.schema_version
            ),
            RestoreCounts::default(),
        );
    }

    info!(
        foreign = document.is_foreign(),
        merge = options.merge_with_existing,
        "starting restore"
    );

    let mut counts = RestoreCounts::default();

    if !options.merge_with_existing {
        if let Err(e) = clear_categories(options, store) {
            warn!(error = %e, "destructive clear failed");
            return RestoreResult::failed(format!("restore aborted: {e}"), counts);
        }
    }

    match apply(document, options, store, &mut counts) {
        Ok(()) => {
            info!(applied = counts.total(), "restore complete");
            RestoreResult::ok(counts)
        }
        Err(e) => {
            warn!(error = %e, applied = counts.total(), "restore aborted mid-apply");
            RestoreResult::failed(format!("restore aborted: {e}"), counts)
        }
    }
}

/// Destructive phase: clear enabled categories before a replace-restore.
fn clear_categories<S>(options: &RestoreOptions, store: &mut S) -> Result<()>
where
    S: StoreReader + StoreWriter,
{
    // History clearing also drops the read markers of every novel currently
    // in the library, so capture the URLs before the library itself goes.
    let known_urls: Vec<String> = if options.history {
        store.library()?.into_iter().map(|n| n.url).collect()
    } else {
        Vec::new()
    };

    if options.library {
        store.clear_library()?;
    }
    if options.bookmarks {
        store.clear_bookmarks()?;
    }
    if options.history {
        store.clear_history()?;
        for url in &known_urls {
            store.clear_read_chapters_for(url)?;
        }
    }
    if options.stats {
        store.clear_reading_stats()?;
    }
    Ok(())
}

/// Per-category apply in fixed order, counting successes as it goes.
fn apply<S>(
    document: &Document,
    options: &RestoreOptions,
    store: &mut S,
    counts: &mut RestoreCounts,
) -> Result<()>
where
    S: StoreReader + StoreWriter + SettingsStore,
{
    if options.library {
        for record in &document.library {
            let overwrite = if options.merge_with_existing {
                match store.get_library(&record.url)? {
                    // Merge keeps whichever side was read more recently;
                    // ties keep the existing row.
                    Some(existing) => record.last_read_or_zero() > existing.last_read_or_zero(),
                    None => true,
                }
            } else {
                true
            };
            if overwrite {
                store.upsert_library(record)?;
                counts.library += 1;
            }
        }
    }

    if options.bookmarks {
        // No natural key, so no existence check: always inserted.
        for record in &document.bookmarks {
            store.insert_bookmark(record)?;
            counts.bookmarks += 1;
        }
    }

    if options.history {
        for record in &document.history {
            let overwrite = match store.get_history(&record.novel_url)? {
                Some(existing) => record.read_at > existing.read_at,
                None => true,
            };
            if overwrite {
                store.upsert_history(record)?;
                counts.history += 1;
            }
        }
        for record in &document.read_chapters {
            store.upsert_read_chapter(record)?;
            counts.read_chapters += 1;
        }
    }

    if options.stats {
        for record in &document.reading_stats {
            store.upsert_reading_stat(record)?;
            counts.stats += 1;
        }
        if let Some(incoming) = &document.reading_streak {
            let replace = match store.reading_streak()? {
                Some(existing) => incoming.longest_streak > existing.longest_streak,
                None => true,
            };
            if replace {
                store.set_reading_streak(incoming)?;
                counts.stats += 1;
            }
        }
    }

    if options.settings {
        if let Some(app) = &document.app_settings {
            store.set_app_settings(app)?;
            counts.settings += 1;
        }
        if let Some(reader) = &document.reader_settings {
            store.set_reader_settings(reader)?;
            counts.settings += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{
        AppSettings, BookmarkRecord, FOREIGN_PRODUCER, HistoryRecord, LibraryRecord,
        ReadChapterRecord, ReaderSettings, ReadingStatsRecord, ReadingStreakRecord,
    };
    use crate::storage::SqliteStorage;

    fn novel(url: &str, last_read_at: Option<i64>) -> LibraryRecord {
        LibraryRecord {
            url: url.to_string(),
            name: format!("Novel at {url}"),
            last_read_at,
            added_at: 1,
            updated_at: 1,
            ..LibraryRecord::default()
        }
    }

    fn bookmark(novel_url: &str) -> BookmarkRecord {
        BookmarkRecord {
            novel_url: novel_url.to_string(),
            chapter_url: format!("{novel_url}/1"),
            created_at: 1,
            updated_at: 1,
            ..BookmarkRecord::default()
        }
    }

    fn document_with_library(records: Vec<LibraryRecord>) -> Document {
        let mut doc = Document::new("0.3.2", "test");
        doc.library = records;
        doc
    }

    #[test]
    fn test_version_gate_rejects_newer_native() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let mut doc = document_with_library(vec![novel("http://x/a", None)]);
        doc.schema_version = CURRENT_VERSION + 1;

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("newer than supported"));
        assert_eq!(result.counts.total(), 0);
        assert!(store.library().unwrap().is_empty());
    }

    #[test]
    fn test_foreign_sentinel_bypasses_version_gate() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let mut doc = document_with_library(vec![novel("http://x/a", None)]);
        doc.schema_version = CURRENT_VERSION + 10;
        doc.producer_version = FOREIGN_PRODUCER.to_string();

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert!(result.success);
        assert_eq!(result.counts.library, 1);
    }

    #[test]
    fn test_merge_keeps_newer_library_row() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store.upsert_library(&novel("http://x/a", Some(100))).unwrap();

        // Older incoming row is ignored
        let doc = document_with_library(vec![novel("http://x/a", Some(50))]);
        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert!(result.success);
        assert_eq!(result.counts.library, 0);
        assert_eq!(
            store.get_library("http://x/a").unwrap().unwrap().last_read_at,
            Some(100)
        );

        // Newer incoming row overwrites
        let doc = document_with_library(vec![novel("http://x/a", Some(150))]);
        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(result.counts.library, 1);
        assert_eq!(
            store.get_library("http://x/a").unwrap().unwrap().last_read_at,
            Some(150)
        );
    }

    #[test]
    fn test_merge_inserts_absent_library_row() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let doc = document_with_library(vec![novel("http://x/new", None)]);
        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(result.counts.library, 1);
    }

    #[test]
    fn test_destructive_restore_replaces_library() {
        let mut store = SqliteStorage::open_memory().unwrap();
        for url in ["http://old/1", "http://old/2", "http://old/3"] {
            store.upsert_library(&novel(url, None)).unwrap();
        }

        let doc = document_with_library(vec![
            novel("http://new/1", None),
            novel("http://new/2", None),
        ]);
        let options = RestoreOptions {
            merge_with_existing: false,
            ..RestoreOptions::default()
        };
        let result = restore(&doc, &options, &mut store);
        assert!(result.success);

        let urls: Vec<String> = store.library().unwrap().into_iter().map(|n| n.url).collect();
        assert_eq!(urls, vec!["http://new/1", "http://new/2"]);
    }

    #[test]
    fn test_destructive_history_clears_known_read_chapters() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store.upsert_library(&novel("http://x/a", None)).unwrap();
        store
            .upsert_read_chapter(&ReadChapterRecord {
                novel_url: "http://x/a".to_string(),
                chapter_url: "http://x/a#chapter-1".to_string(),
                read_at: 1,
            })
            .unwrap();
        // Read marker for a novel no longer in the library survives
        store
            .upsert_read_chapter(&ReadChapterRecord {
                novel_url: "http://gone/b".to_string(),
                chapter_url: "http://gone/b#chapter-1".to_string(),
                read_at: 1,
            })
            .unwrap();

        let options = RestoreOptions {
            merge_with_existing: false,
            ..RestoreOptions::default()
        };
        let result = restore(&Document::new("0.3.2", "test"), &options, &mut store);
        assert!(result.success);

        let remaining = store.read_chapters().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].novel_url, "http://gone/b");
    }

    #[test]
    fn test_history_overwrites_only_when_newer() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store
            .upsert_history(&HistoryRecord {
                novel_url: "http://x/a".to_string(),
                chapter_url: "http://x/a/5".to_string(),
                read_at: 500,
                ..HistoryRecord::default()
            })
            .unwrap();

        let mut doc = Document::new("0.3.2", "test");
        doc.history.push(HistoryRecord {
            novel_url: "http://x/a".to_string(),
            chapter_url: "http://x/a/3".to_string(),
            read_at: 300,
            ..HistoryRecord::default()
        });
        doc.history.push(HistoryRecord {
            novel_url: "http://x/b".to_string(),
            chapter_url: "http://x/b/1".to_string(),
            read_at: 100,
            ..HistoryRecord::default()
        });

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert!(result.success);
        // Stale row skipped, absent row inserted
        assert_eq!(result.counts.history, 1);
        assert_eq!(
            store.get_history("http://x/a").unwrap().unwrap().read_at,
            500
        );
        assert!(store.get_history("http://x/b").unwrap().is_some());
    }

    #[test]
    fn test_bookmarks_duplicate_on_repeated_merge() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let mut doc = Document::new("0.3.2", "test");
        doc.bookmarks.push(bookmark("http://x/a"));

        restore(&doc, &RestoreOptions::default(), &mut store);
        restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(store.bookmarks().unwrap().len(), 2);
    }

    #[test]
    fn test_streak_replaced_only_when_longer() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store
            .set_reading_streak(&ReadingStreakRecord {
                longest_streak: 10,
                ..ReadingStreakRecord::default()
            })
            .unwrap();

        let mut doc = Document::new("0.3.2", "test");
        doc.reading_streak = Some(ReadingStreakRecord {
            longest_streak: 5,
            ..ReadingStreakRecord::default()
        });
        restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(store.reading_streak().unwrap().unwrap().longest_streak, 10);

        doc.reading_streak = Some(ReadingStreakRecord {
            longest_streak: 20,
            ..ReadingStreakRecord::default()
        });
        restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(store.reading_streak().unwrap().unwrap().longest_streak, 20);
    }

    #[test]
    fn test_settings_overwritten_unconditionally() {
        let mut store = SqliteStorage::open_memory().unwrap();
        store.set_app_settings(&AppSettings::default()).unwrap();

        let mut doc = Document::new("0.3.2", "test");
        doc.app_settings = Some(AppSettings {
            language: "de".to_string(),
            ..AppSettings::default()
        });
        doc.reader_settings = Some(ReaderSettings::default());

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(result.counts.settings, 2);
        assert_eq!(store.app_settings().unwrap().unwrap().language, "de");
    }

    #[test]
    fn test_disabled_categories_are_skipped() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let mut doc = document_with_library(vec![novel("http://x/a", None)]);
        doc.bookmarks.push(bookmark("http://x/a"));

        let options = RestoreOptions {
            library: false,
            ..RestoreOptions::default()
        };
        let result = restore(&doc, &options, &mut store);
        assert!(result.success);
        assert_eq!(result.counts.library, 0);
        assert_eq!(result.counts.bookmarks, 1);
        assert!(store.library().unwrap().is_empty());
    }

    #[test]
    fn test_stats_rows_upserted() {
        let mut store = SqliteStorage::open_memory().unwrap();
        let mut doc = Document::new("0.3.2", "test");
        doc.reading_stats.push(ReadingStatsRecord {
            novel_url: "http://x/a".to_string(),
            date: "2026-08-29".to_string(),
            seconds_read: 120,
            ..ReadingStatsRecord::default()
        });

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(result.counts.stats, 1);
        // Idempotent by natural key
        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert_eq!(result.counts.stats, 1);
        assert_eq!(store.reading_stats().unwrap().len(), 1);
    }

    // Writer that fails on the first bookmark insert, for partial-restore
    // accounting.
    struct FailingStore {
        inner: SqliteStorage,
    }

    impl StoreReader for FailingStore {
        fn library(&self) -> Result<Vec<LibraryRecord>> {
            self.inner.library()
        }
        fn get_library(&self, url: &str) -> Result<Option<LibraryRecord>> {
            self.inner.get_library(url)
        }
        fn bookmarks(&self) -> Result<Vec<BookmarkRecord>> {
            self.inner.bookmarks()
        }
        fn history(&self) -> Result<Vec<HistoryRecord>> {
            self.inner.history()
        }
        fn get_history(&self, novel_url: &str) -> Result<Option<HistoryRecord>> {
            self.inner.get_history(novel_url)
        }
        fn read_chapters(&self) -> Result<Vec<ReadChapterRecord>> {
            self.inner.read_chapters()
        }
        fn reading_stats(&self) -> Result<Vec<ReadingStatsRecord>> {
            self.inner.reading_stats()
        }
        fn reading_streak(&self) -> Result<Option<ReadingStreakRecord>> {
            self.inner.reading_streak()
        }
    }

    impl StoreWriter for FailingStore {
        fn upsert_library(&mut self, record: &LibraryRecord) -> Result<()> {
            self.inner.upsert_library(record)
        }
        fn insert_bookmark(&mut self, _record: &BookmarkRecord) -> Result<()> {
            Err(Error::Other("bookmark table unavailable".to_string()))
        }
        fn upsert_history(&mut self, record: &HistoryRecord) -> Result<()> {
            self.inner.upsert_history(record)
        }
        fn upsert_read_chapter(&mut self, record: &ReadChapterRecord) -> Result<()> {
            self.inner.upsert_read_chapter(record)
        }
        fn upsert_reading_stat(&mut self, record: &ReadingStatsRecord) -> Result<()> {
            self.inner.upsert_reading_stat(record)
        }
        fn set_reading_streak(&mut self, record: &ReadingStreakRecord) -> Result<()> {
            self.inner.set_reading_streak(record)
        }
        fn clear_library(&mut self) -> Result<()> {
            self.inner.clear_library()
        }
        fn clear_bookmarks(&mut self) -> Result<()> {
            self.inner.clear_bookmarks()
        }
        fn clear_history(&mut self) -> Result<()> {
            self.inner.clear_history()
        }
        fn clear_read_chapters_for(&mut self, novel_url: &str) -> Result<()> {
            self.inner.clear_read_chapters_for(novel_url)
        }
        fn clear_reading_stats(&mut self) -> Result<()> {
            self.inner.clear_reading_stats()
        }
    }

    impl SettingsStore for FailingStore {
        fn app_settings(&self) -> Result<Option<AppSettings>> {
            self.inner.app_settings()
        }
        fn set_app_settings(&mut self, settings: &AppSettings) -> Result<()> {
            self.inner.set_app_settings(settings)
        }
        fn reader_settings(&self) -> Result<Option<ReaderSettings>> {
            self.inner.reader_settings()
        }
        fn set_reader_settings(&mut self, settings: &ReaderSettings) -> Result<()> {
            self.inner.set_reader_settings(settings)
        }
    }

    #[test]
    fn test_partial_failure_keeps_committed_counts() {
        let mut store = FailingStore {
            inner: SqliteStorage::open_memory().unwrap(),
        };
        let mut doc = document_with_library(vec![
            novel("http://x/a", None),
            novel("http://x/b", None),
        ]);
        doc.bookmarks.push(bookmark("http://x/a"));
        doc.history.push(HistoryRecord {
            novel_url: "http://x/a".to_string(),
            read_at: 1,
            ..HistoryRecord::default()
        });

        let result = restore(&doc, &RestoreOptions::default(), &mut store);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("bookmark table unavailable"));
        // Library committed before the failure, history never reached
        assert_eq!(result.counts.library, 2);
        assert_eq!(result.counts.bookmarks, 0);
        assert_eq!(result.counts.history, 0);
        assert_eq!(store.inner.library().unwrap().len(), 2);
        assert!(store.inner.history().unwrap().is_empty());
    }
}
