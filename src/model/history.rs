//! Reading history and per-chapter read markers.

use serde::{Deserialize, Serialize};

/// The most recent reading position for a novel. Natural key: `novel_url`,
/// one row per novel. The store's primary key enforces the single-row
/// invariant; the document boundary does not re-validate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryRecord {
    /// URL of the novel. Natural key.
    pub novel_url: String,
    /// URL of the chapter last read.
    pub chapter_url: String,
    /// Title of the chapter last read.
    pub chapter_title: String,
    /// Provider name.
    pub provider: String,
    /// When the chapter was read (Unix milliseconds).
    pub read_at: i64,
}

/// A single chapter marked as read. Natural key: `(novel_url, chapter_url)`.
/// Upserts by key, so re-importing is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadChapterRecord {
    /// URL of the novel.
    pub novel_url: String,
    /// URL of the chapter.
    pub chapter_url: String,
    /// When the chapter was read (Unix milliseconds).
    pub read_at: i64,
}
