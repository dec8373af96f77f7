//! `novelkeep import` - restore a backup into the database.

use std::path::PathBuf;

use colored::Colorize;

use crate::backup::{codec, detect, file, foreign, restore, RestoreOptions, RestoreResult};
use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::model::CURRENT_VERSION;
use crate::storage::SqliteStorage;

#[derive(Debug, Clone, Copy)]
pub struct ImportArgs {
    pub replace: bool,
    pub skip_library: bool,
    pub skip_bookmarks: bool,
    pub skip_history: bool,
    pub skip_stats: bool,
    pub skip_settings: bool,
}

pub fn execute(
    input: &PathBuf,
    args: ImportArgs,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let db_path =
        resolve_db_path(db_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;
    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    let bytes = file::read_backup(input)?;
    let foreign_source = detect::is_foreign(&bytes);
    let document = if foreign_source {
        foreign::convert(&bytes)?
    } else {
        codec::decode(&bytes)?
    };

    // Reject too-new native backups up front so the failure carries the
    // version exit code and update hint instead of a generic restore error.
    if !document.is_foreign() && document.schema_version > CURRENT_VERSION {
        return Err(Error::Version {
            found: document.schema_version,
            supported: CURRENT_VERSION,
        });
    }

    let options = RestoreOptions {
        library: !args.skip_library,
        bookmarks: !args.skip_bookmarks,
        history: !args.skip_history,
        stats: !args.skip_stats,
        settings: !args.skip_settings,
        merge_with_existing: !args.replace,
    };

    let mut store = SqliteStorage::open(&db_path)?;
    let result = restore(&document, &options, &mut store);

    print_result(&result, foreign_source, json);

    if result.success {
        Ok(())
    } else {
        // Counts were already reported; surface the failure via exit code.
        Err(Error::Other(
            result
                .error
                .unwrap_or_else(|| "restore failed".to_string()),
        ))
    }
}

fn print_result(result: &RestoreResult, foreign_source: bool, json: bool) {
    if json {
        let mut output = serde_json::json!({
            "success": result.success,
            "foreign": foreign_source,
            "counts": result.counts,
        });
        if let Some(error) = &result.error {
            output["error"] = serde_json::Value::String(error.clone());
        }
        println!("{output}");
        return;
    }

    if result.success {
        println!("{}", "Restore complete".green().bold());
    } else {
        println!("{}", "Restore incomplete".red().bold());
    }
    if foreign_source {
        println!("  (converted from legacy export)");
    }
    println!();
    let counts = &result.counts;
    println!("  Library:       {}", counts.library);
    println!("  Bookmarks:     {}", counts.bookmarks);
    println!("  History:       {}", counts.history);
    println!("  Read chapters: {}", counts.read_chapters);
    println!("  Stats:         {}", counts.stats);
    println!("  Settings:      {}", counts.settings);
    println!();
    println!("  Total: {} applied", counts.total());
}
