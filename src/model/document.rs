//! The versioned backup document envelope.

use serde::{Deserialize, Serialize};

use crate::model::{
    AppSettings, BookmarkRecord, HistoryRecord, LibraryRecord, ReadChapterRecord, ReaderSettings,
    ReadingStatsRecord, ReadingStreakRecord,
};

/// Schema version written by this build.
///
/// Documents with a higher `schema_version` are rejected before any store
/// mutation. The version only moves forward.
pub const CURRENT_VERSION: u32 = 2;

/// Sentinel `producer_version` marking a document converted from a foreign
/// export. Foreign-derived documents bypass the native version gate because
/// their `schema_version` never came from a NovelKeep build.
pub const FOREIGN_PRODUCER: &str = "legacy-import";

/// A complete snapshot of user state.
///
/// Documents are transient: built fresh for an export or parsed fresh for an
/// import, then discarded. Only the serialized bytes persist, as a file owned
/// by the user. Record relationships are string-key references only; nothing
/// in the envelope enforces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Schema version of the producing build.
    pub schema_version: u32,
    /// Export timestamp (Unix milliseconds).
    pub created_at: i64,
    /// Version string of the producing app, or [`FOREIGN_PRODUCER`].
    pub producer_version: String,
    /// Free-form description of the producing device.
    pub device_info: String,
    /// Library entries, keyed by source URL.
    pub library: Vec<LibraryRecord>,
    /// Bookmarks. No natural key: see [`BookmarkRecord`].
    pub bookmarks: Vec<BookmarkRecord>,
    /// Reading history, one row per novel URL.
    pub history: Vec<HistoryRecord>,
    /// Per-chapter read markers, keyed by (novel URL, chapter URL).
    pub read_chapters: Vec<ReadChapterRecord>,
    /// Daily reading statistics, keyed by (novel URL, date).
    pub reading_stats: Vec<ReadingStatsRecord>,
    /// Streak singleton, if the producer tracked one.
    pub reading_streak: Option<ReadingStreakRecord>,
    /// App settings blob, if exported.
    pub app_settings: Option<AppSettings>,
    /// Reader settings blob, if exported.
    pub reader_settings: Option<ReaderSettings>,
}

impl Document {
    /// Create an empty document stamped with the current version and time.
    #[must_use]
    pub fn new(producer_version: &str, device_info: &str) -> Self {
        Self {
            schema_version: CURRENT_VERSION,
            created_at: chrono::Utc::now().timestamp_millis(),
            producer_version: producer_version.to_string(),
            device_info: device_info.to_string(),
            ..Self::default()
        }
    }

    /// Whether this document was converted from a foreign export.
    #[must_use]
    pub fn is_foreign(&self) -> bool {
        self.producer_version == FOREIGN_PRODUCER
    }
}
