//! Tally - a personal task list that lives in one text file.
//!
//! This library provides the core functionality for the `ty` CLI tool:
//! the task list state machine, the single-file persistence layer with
//! rolling backups, and the command implementations.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod render;
pub mod storage;
pub mod sys;

/// Library-level error type for tally operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no task with index {0}")]
    IndexNotFound(usize),

    #[error("missing {0}")]
    MissingArgument(String),

    #[error("no backups available to undo")]
    NoBackup,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for tally operations.
pub type Result<T> = std::result::Result<T, Error>;
