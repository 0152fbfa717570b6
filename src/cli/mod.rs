//! CLI argument definitions for tally.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TY_GIT_COMMIT"),
    ", built ",
    env!("TY_BUILD_TIMESTAMP"),
    ")"
);

/// Tally - a personal task list that lives in one text file.
///
/// Run with no arguments to print the list. `+` tasks come first, `-` tasks
/// after, `x` tasks last.
#[derive(Parser, Debug)]
#[command(name = "ty")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "A personal task list with rolling backups", long_about = None)]
pub struct Cli {
    /// Output machine-readable JSON instead of the styled list
    #[arg(short = 'j', long = "json", global = true)]
    pub json: bool,

    /// Use <FILE> as the task list instead of ~/.tally.
    /// Can also be set via the TALLY_FILE environment variable.
    #[arg(short = 'f', long = "file", global = true, env = "TALLY_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task (a leading "+", "-" or "x" token sets its status)
    Add {
        /// Task text; words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show only the active (+) tasks
    #[command(aliases = ["now", "top"])]
    Today,

    /// Remove completed (x) tasks from the list
    Flush,

    /// Restore the most recent backup of the list
    Undo,

    /// Open the task list with the system file opener
    Open,

    /// Edit the task list in your editor, then show it
    #[command(alias = "vi")]
    Edit,

    /// Show the resolved configuration
    Config,

    // Status changes arrive as a bare pattern rather than a verb: `3x`, `x3`,
    // or `3 done`. They fall through clap as an external subcommand and are
    // parsed in the command layer.
    #[command(external_subcommand)]
    Mark(Vec<String>),
}
