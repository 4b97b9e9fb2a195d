//! Record command: append one finished activity to the timelog.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};

use crate::Config;
use crate::commands::util::open_timelog;

/// Records `description` as finished at `end_time`.
pub fn record_at(config: &Config, description: &str, end_time: NaiveDateTime) -> Result<()> {
    if description.trim().is_empty() {
        bail!("you must provide an activity description");
    }

    let mut store = open_timelog(config)?;
    store.record(description, end_time)?;
    tracing::debug!(description, %end_time, "recorded activity");
    Ok(())
}

/// Records `description` as finished now.
pub fn run(config: &Config, description: &str) -> Result<()> {
    record_at(config, description, Local::now().naive_local())
}
