//! CLI definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// NovelKeep - backup, restore, and legacy-import for your reading library
#[derive(Parser, Debug)]
#[command(name = "novelkeep", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: platform data dir)
    #[arg(long, global = true, env = "NOVELKEEP_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the NovelKeep database
    Init {
        /// Overwrite an existing database
        #[arg(long)]
        force: bool,
    },

    /// Export the full library state to a backup file
    Export {
        /// Destination file (suggested extension: .nkbak)
        file: PathBuf,
    },

    /// Preview a backup file without applying it
    Inspect {
        /// Backup file to inspect (native or legacy)
        file: PathBuf,
    },

    /// Restore a backup file into the database
    Import {
        /// Backup file to import (native or legacy)
        file: PathBuf,

        /// Replace existing data instead of merging
        #[arg(long)]
        replace: bool,

        /// Skip library entries
        #[arg(long)]
        skip_library: bool,

        /// Skip bookmarks
        #[arg(long)]
        skip_bookmarks: bool,

        /// Skip history and read-chapter markers
        #[arg(long)]
        skip_history: bool,

        /// Skip reading statistics and streak
        #[arg(long)]
        skip_stats: bool,

        /// Skip app and reader settings
        #[arg(long)]
        skip_settings: bool,
    },
}
