//! Timelog CLI library.
//!
//! This crate provides the `tl` command-line interface over the timelog
//! store and report engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
