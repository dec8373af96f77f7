//! Reading statistics and streak records.

use serde::{Deserialize, Serialize};

/// Aggregated reading statistics for one novel on one day.
/// Natural key: `(novel_url, date)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingStatsRecord {
    /// URL of the novel.
    pub novel_url: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Seconds spent reading.
    pub seconds_read: u64,
    /// Chapters finished.
    pub chapters_read: u32,
    /// Words read (estimated).
    pub words_read: u64,
    /// Number of reading sessions.
    pub session_count: u32,
    /// Longest single session, in seconds.
    pub longest_session_seconds: u64,
}

/// The reading-streak singleton.
///
/// During merge-restore an incoming streak only replaces the existing one if
/// its `longest_streak` is strictly greater, so a restore can never shrink a
/// streak the user earned on this device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingStreakRecord {
    /// Current consecutive-day streak.
    pub current_streak: u32,
    /// Longest streak ever reached.
    pub longest_streak: u32,
    /// Last date the user read anything, `YYYY-MM-DD`.
    pub last_read_date: String,
    /// Total distinct days with reading activity.
    pub total_days_read: u32,
    /// Total seconds read across all time.
    pub total_seconds_read: u64,
}
