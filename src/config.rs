//! Configuration and path resolution.

use std::path::{Path, PathBuf};

/// Resolve the database path.
///
/// Priority: the path from `--db` or `NOVELKEEP_DB` (clap fills the flag
/// from the variable), then the platform data directory
/// (e.g. `~/.local/share/novelkeep/novelkeep.db`).
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    directories::ProjectDirs::from("app", "novelkeep", "novelkeep")
        .map(|dirs| dirs.data_dir().join("novelkeep.db"))
}

/// Free-form device description stamped into exported documents.
#[must_use]
pub fn device_info() -> String {
    format!(
        "novelkeep {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
