//! Shared helpers for subcommands.

use std::fs::{self, File, OpenOptions};

use anyhow::{Context, Result};
use fs2::FileExt;

use tl_core::activity::DayBoundary;
use tl_store::Timelog;

use crate::Config;

/// Opens the configured timelog file and replays its history.
///
/// The file is created (along with its parent directory) on first use and
/// held under an exclusive lock for the lifetime of the returned store, so
/// only one process appends at a time. The lock is released when the store
/// is dropped.
pub(crate) fn open_timelog(config: &Config) -> Result<Timelog<File>> {
    if let Some(parent) = config.timelog_path.parent() {
        fs::create_dir_all(parent).context("failed to create timelog directory")?;
    }

    let sink = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.timelog_path)
        .with_context(|| format!("failed to open {}", config.timelog_path.display()))?;
    sink.lock_exclusive()
        .context("failed to lock timelog file")?;

    let history = fs::read_to_string(&config.timelog_path)
        .with_context(|| format!("failed to read {}", config.timelog_path.display()))?;
    let boundary = DayBoundary {
        hour: config.day_boundary_hour,
    };
    let store = Timelog::load(history.as_bytes(), sink, boundary)?;
    Ok(store)
}
