//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Plain-text work timelog.
///
/// Records what you just finished into a flat timelog file and renders
/// daily and weekly summaries from it.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record an activity that just finished.
    Record {
        /// What you were doing. End the text with `**` to mark slack time.
        #[arg(required = true)]
        description: Vec<String>,
    },

    /// Summarize one day's activities.
    Daily {
        /// Day to report on (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize one week's activities, Monday through Sunday.
    Weekly {
        /// Any day inside the week to report on (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}
