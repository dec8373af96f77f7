//! Data model for NovelKeep.
//!
//! Every exportable entity lives here, along with the versioned [`Document`]
//! envelope that carries a complete snapshot of user state. All records are
//! plain serde structs with defaults for every optional field, so decoding a
//! document written by an older build never fails on a missing field.

mod bookmark;
mod document;
mod history;
mod library;
mod settings;
mod stats;

pub use bookmark::BookmarkRecord;
pub use document::{Document, CURRENT_VERSION, FOREIGN_PRODUCER};
pub use history::{HistoryRecord, ReadChapterRecord};
pub use library::{LibraryRecord, ReadingStatus};
pub use settings::{
    AppSettings, ReaderSettings, TextAlign, Theme, AUTOSCROLL_SPEED_MAX, AUTOSCROLL_SPEED_MIN,
};
pub use stats::{ReadingStatsRecord, ReadingStreakRecord};
