//! Bookmark records.

use serde::{Deserialize, Serialize};

/// A bookmark inside a chapter.
///
/// Bookmarks carry no natural key, so the restore orchestrator always inserts
/// them: importing the same backup twice with merge enabled duplicates every
/// bookmark. Deliberate: silently de-duplicating without a defined key could
/// drop bookmarks the user considers distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookmarkRecord {
    /// URL of the novel this bookmark belongs to.
    pub novel_url: String,
    /// URL of the bookmarked chapter.
    pub chapter_url: String,
    /// Text snippet at the bookmark position.
    pub snippet: Option<String>,
    /// User note.
    pub note: Option<String>,
    /// User-assigned category.
    pub category: Option<String>,
    /// Highlight color name.
    pub color: Option<String>,
    /// Creation timestamp (Unix milliseconds).
    pub created_at: i64,
    /// Last update timestamp (Unix milliseconds).
    pub updated_at: i64,
}
