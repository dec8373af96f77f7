//! Backup, restore, and legacy-import engine.
//!
//! Data flow:
//!
//! - **Export**: [`snapshot::build_snapshot`] reads every live collection and
//!   assembles a [`crate::model::Document`]; [`codec::encode`] turns it into
//!   pretty-printed JSON; [`file::write_backup`] writes it atomically.
//! - **Import**: [`file::read_backup`] loads the bytes; [`detect::is_foreign`]
//!   classifies them; [`codec::decode`] or [`foreign::convert`] produces a
//!   `Document`; [`restore::restore`] applies it to the store and reports
//!   per-category counts.
//!
//! All operations run sequentially to completion. Restores against the same
//! store must not overlap; callers serialize (the `&mut` store access makes
//! overlap impossible within one process).

pub mod codec;
pub mod detect;
pub mod file;
pub mod foreign;
pub mod metadata;
pub mod restore;
pub mod snapshot;

pub use codec::{decode, encode};
pub use detect::is_foreign;
pub use foreign::convert;
pub use metadata::{inspect, BackupMetadata};
pub use restore::{restore, RestoreCounts, RestoreOptions, RestoreResult};
pub use snapshot::build_snapshot;

/// Suggested file extension for NovelKeep backups.
pub const BACKUP_EXTENSION: &str = "nkbak";
