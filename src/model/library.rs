//! Library entries and reading status.

use serde::{Deserialize, Serialize};

/// Where a novel sits in the user's reading flow.
///
/// Persisted by name string. Unknown names decode to [`ReadingStatus::Reading`]
/// so a backup from a build with extra variants still imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReadingStatus {
    #[default]
    Reading,
    Completed,
    OnHold,
    Dropped,
    PlanToRead,
}

impl ReadingStatus {
    /// Stable name string used in documents and the store.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::PlanToRead => "plan_to_read",
        }
    }

    /// Parse a name string, falling back to the default on unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "on_hold" => Self::OnHold,
            "dropped" => Self::Dropped,
            "plan_to_read" => Self::PlanToRead,
            _ => Self::Reading,
        }
    }
}

impl From<String> for ReadingStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ReadingStatus> for String {
    fn from(status: ReadingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A novel in the user's library. Natural key: `url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryRecord {
    /// Source URL of the novel. Natural key.
    pub url: String,
    /// Display name.
    pub name: String,
    /// Poster/cover image URL.
    pub cover_url: String,
    /// Provider (content source) name.
    pub provider: String,
    /// Reading status.
    pub status: ReadingStatus,
    /// Reference to the last chapter the user was on.
    pub last_chapter: String,
    /// Last read timestamp (Unix milliseconds). `None` means never read;
    /// merge comparisons treat it as 0.
    pub last_read_at: Option<i64>,
    /// Scroll position within the last chapter, 0.0–1.0.
    pub scroll_position: f32,
    /// Total known chapters.
    pub total_chapters: u32,
    /// Chapters the user has acknowledged (dismissed the "new" badge).
    pub acknowledged_chapters: u32,
    /// Unread chapter count.
    pub unread_chapters: u32,
    /// When the novel was added to the library (Unix milliseconds).
    pub added_at: i64,
    /// When the entry was last updated (Unix milliseconds).
    pub updated_at: i64,
}

impl LibraryRecord {
    /// `last_read_at` with `None` collapsed to 0, for merge comparisons.
    #[must_use]
    pub fn last_read_or_zero(&self) -> i64 {
        self.last_read_at.unwrap_or(0)
    }
}
