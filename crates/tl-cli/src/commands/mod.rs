//! CLI subcommand implementations.

pub mod daily;
pub mod record;
pub mod weekly;

mod util;
