//! `novelkeep init` - create the database.

use std::path::PathBuf;

use colored::Colorize;

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;

pub fn execute(force: bool, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(|p| p.as_path()))
        .ok_or_else(|| Error::Other("Could not determine a data directory".to_string()))?;

    if db_path.exists() {
        if !force {
            return Err(Error::AlreadyInitialized { path: db_path });
        }
        std::fs::remove_file(&db_path)?;
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    SqliteStorage::open(&db_path)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "db": db_path.display().to_string(),
            })
        );
    } else {
        println!(
            "{} database at {}",
            "Initialized".green().bold(),
            db_path.display()
        );
    }
    Ok(())
}
