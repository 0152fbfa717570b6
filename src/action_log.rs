//! Action logging for tally commands.
//!
//! Every invocation appends one JSONL entry to a structured log file so the
//! history of list mutations can be inspected later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Represents a single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// ISO 8601 timestamp when the action occurred
    pub timestamp: DateTime<Utc>,

    /// Task list file the command ran against
    pub list_path: String,

    /// Command name (e.g., "add", "flush", "mark")
    pub command: String,

    /// Command arguments as JSON
    pub args: serde_json::Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who executed the command
    pub user: String,
}

/// Log an action to the configured log file.
///
/// This function never fails a command - on any logging problem it degrades
/// to a warning on stderr.
pub fn log_action(
    settings: &Settings,
    command: &str,
    args: serde_json::Value,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if !settings.action_log {
        return Ok(());
    }

    let log_path = match resolve_log_path(settings) {
        Some(path) => path,
        None => {
            eprintln!("Warning: Could not determine action log path");
            return Ok(());
        }
    };

    let entry = ActionLog {
        timestamp: Utc::now(),
        list_path: settings.list_path.to_string_lossy().to_string(),
        command: command.to_string(),
        args: truncate_args(&args),
        success,
        error,
        duration_ms,
        user: current_user(),
    };

    if let Err(err) = write_log_entry(&log_path, &entry) {
        eprintln!("Warning: Failed to write action log: {}", err);
    }

    Ok(())
}

/// The log location: the configured path, or `~/.local/share/tally/action.log`.
fn resolve_log_path(settings: &Settings) -> Option<PathBuf> {
    if let Some(path) = &settings.action_log_path {
        return Some(path.clone());
    }
    let home = dirs::home_dir()?;
    Some(home.join(".local/share/tally/action.log"))
}

/// Write a log entry to the log file.
fn write_log_entry(path: &Path, entry: &ActionLog) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// Cap oversized argument values so the log stays one short line per entry.
fn truncate_args(args: &serde_json::Value) -> serde_json::Value {
    match args {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), truncate_args(value)))
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            if arr.len() > 10 {
                serde_json::Value::String(format!("[Array with {} items]", arr.len()))
            } else {
                serde_json::Value::Array(arr.iter().map(truncate_args).collect())
            }
        }
        serde_json::Value::String(s) => {
            if s.chars().count() > 100 {
                let head: String = s.chars().take(97).collect();
                serde_json::Value::String(format!("{}... ({} chars)", head, s.chars().count()))
            } else {
                args.clone()
            }
        }
        _ => args.clone(),
    }
}

/// Get the current user's username.
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
