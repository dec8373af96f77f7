//! Error types for NovelKeep.
//!
//! The backup engine distinguishes four failure classes:
//! - I/O failures (backup location unreadable/unwritable)
//! - Format failures (bytes parse as neither native nor foreign schema)
//! - Version failures (native document newer than this build supports)
//! - Database failures (the underlying store rejected an operation)
//!
//! Partial-restore failures are *not* an `Error` variant: the restore
//! orchestrator reports them through `RestoreResult` together with the
//! per-category counts that were already committed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for NovelKeep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in NovelKeep operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `novelkeep init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Invalid backup format: {0}")]
    Format(String),

    #[error("Backup schema version {found} is newer than supported version {supported}")]
    Version { found: u32, supported: u32 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

impl Error {
    /// Category-based exit code for the CLI.
    ///
    /// 1=internal, 2=database, 3=version, 4=validation, 5=format, 8=I/O.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Other(_) => 1,
            Self::NotInitialized | Self::AlreadyInitialized { .. } | Self::Database(_) => 2,
            Self::Version { .. } => 3,
            Self::InvalidArgument(_) => 4,
            Self::Format(_) => 5,
            Self::Io(_) => 8,
        }
    }

    /// Context-aware recovery hint, or `None` if nothing actionable exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => {
                Some("Run `novelkeep init` to create the database".to_string())
            }
            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),
            Self::Version { supported, .. } => Some(format!(
                "This build reads backups up to schema version {supported}. \
                 Update NovelKeep to import this file."
            )),
            Self::Format(_) => Some(
                "The file is neither a NovelKeep backup nor a recognized legacy export."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Structured JSON representation for `--json` consumers.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "exit_code": self.exit_code(),
            }
        });
        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }
        obj
    }
}
