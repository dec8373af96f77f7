//! `novelkeep inspect` - preview a backup without touching the store.

use std::path::PathBuf;

use colored::Colorize;

use crate::backup::{file, inspect};
use crate::error::Result;

pub fn execute(input: &PathBuf, json: bool) -> Result<()> {
    let bytes = file::read_backup(input)?;
    let meta = inspect(&bytes)?;

    if json {
        println!("{}", serde_json::to_string(&meta)?);
        return Ok(());
    }

    if meta.is_foreign {
        println!(
            "{} {} - {}",
            "Inspecting".cyan().bold(),
            input.display(),
            "legacy export".yellow()
        );
    } else {
        println!(
            "{} {} - NovelKeep backup (schema v{})",
            "Inspecting".cyan().bold(),
            input.display(),
            meta.schema_version
        );
    }
    println!();
    println!("  Library:         {}", meta.library);
    println!("  Bookmarks:       {}", meta.bookmarks);
    println!("  History:         {}", meta.history);
    println!("  Read chapters:   {}", meta.read_chapters);
    println!("  Stat rows:       {}", meta.reading_stats);
    println!("  Streak:          {}", if meta.has_streak { "yes" } else { "no" });
    println!(
        "  App settings:    {}",
        if meta.has_app_settings { "yes" } else { "no" }
    );
    println!(
        "  Reader settings: {}",
        if meta.has_reader_settings { "yes" } else { "no" }
    );
    Ok(())
}
