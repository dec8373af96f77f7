//! Backup file I/O.
//!
//! Writes go to a temp file first, sync to disk, then rename over the
//! target, so a crashed export never leaves a half-written backup behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Read a backup file into memory.
///
/// # Errors
///
/// Returns `Error::Io` if the location is unreadable.
pub fn read_backup(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write backup bytes atomically.
///
/// 1. Write to `<path>.tmp`
/// 2. fsync
/// 3. Rename over the target
///
/// If any step fails the original file (if any) is untouched.
///
/// # Errors
///
/// Returns `Error::Io` if any file operation fails.
pub fn write_backup(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}
