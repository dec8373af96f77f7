//! `novelkeep export` - snapshot the store into a backup file.

use std::path::PathBuf;

use colored::Colorize;

use crate::backup::{build_snapshot, codec, file};
use crate::config::{device_info, resolve_db_path};
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;

pub fn execute(output: &PathBuf, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path =
        resolve_db_path(db_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;
    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    let store = SqliteStorage::open(&db_path)?;
    let document = build_snapshot(&store, &store, &device_info())?;
    let bytes = codec::encode(&document)?;
    file::write_backup(output, &bytes)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "file": output.display().to_string(),
                "library": document.library.len(),
                "bookmarks": document.bookmarks.len(),
                "history": document.history.len(),
                "readChapters": document.read_chapters.len(),
                "readingStats": document.reading_stats.len(),
            })
        );
    } else {
        println!("{} {}", "Exported".green().bold(), output.display());
        println!();
        println!("  Library:       {}", document.library.len());
        println!("  Bookmarks:     {}", document.bookmarks.len());
        println!("  History:       {}", document.history.len());
        println!("  Read chapters: {}", document.read_chapters.len());
        println!("  Stat rows:     {}", document.reading_stats.len());
    }
    Ok(())
}
