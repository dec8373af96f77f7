//! NovelKeep - backup, restore, and legacy-import engine for a reading app.
//!
//! # Architecture
//!
//! - [`model`] - Document envelope and entity records
//! - [`backup`] - Codec, format detection, foreign conversion, snapshot,
//!   metadata, restore orchestration
//! - [`storage`] - Store traits and the SQLite backend
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Path resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use error::{Error, Result};
