//! Configuration for tally.
//!
//! An optional TOML file supplies defaults for the list location, backup
//! policy, editor, and action log:
//!
//! ```toml
//! # ~/.config/tally/config.toml
//! list-path = "~/notes/todo.txt"
//! backups = "rotating"      # or "timestamped"
//! backup-bound = 100
//! editor = "nvim"
//! action-log = true
//! ```
//!
//! Precedence: CLI flag > environment > config file > defaults. Everything is
//! resolved once at startup into a [`Settings`] struct that is passed into
//! the storage and command layers; there is no hidden global state.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{BackupPolicy, DEFAULT_BACKUP_BOUND};
use crate::{Error, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_FILE_ENV: &str = "TALLY_CONFIG";

/// Default list file name, directly under the home directory.
const DEFAULT_LIST_FILE: &str = ".tally";

/// Backup policy choice as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    #[default]
    Rotating,
    Timestamped,
}

/// Raw contents of `config.toml`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub list_path: Option<String>,
    pub backups: Option<BackupKind>,
    pub backup_bound: Option<u32>,
    pub editor: Option<String>,
    pub action_log: Option<bool>,
    pub action_log_path: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the live task list file.
    pub list_path: PathBuf,
    /// How backups are kept.
    pub policy: BackupPolicy,
    /// Preferred editor command, if configured.
    pub editor: Option<String>,
    /// Whether invocations are appended to the action log.
    pub action_log: bool,
    /// Custom action log location, if configured.
    pub action_log_path: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from the CLI flag (which clap already backs with the
    /// `TALLY_FILE` environment variable), the config file, and defaults.
    pub fn resolve(flag_path: Option<PathBuf>) -> Result<Self> {
        let file = load_file_config()?.unwrap_or_default();

        let list_path = match flag_path {
            Some(path) => path,
            None => match &file.list_path {
                Some(raw) => expand_home(Path::new(raw)),
                None => default_list_path()?,
            },
        };

        let policy = match file.backups.unwrap_or_default() {
            BackupKind::Rotating => BackupPolicy::Rotating {
                bound: file.backup_bound.unwrap_or(DEFAULT_BACKUP_BOUND),
            },
            BackupKind::Timestamped => BackupPolicy::Timestamped,
        };

        Ok(Self {
            list_path,
            policy,
            editor: file.editor,
            action_log: file.action_log.unwrap_or(true),
            action_log_path: file
                .action_log_path
                .as_deref()
                .map(|raw| expand_home(Path::new(raw))),
        })
    }
}

/// The config file location: `TALLY_CONFIG` if set, otherwise
/// `~/.config/tally/config.toml` (per the platform config dir).
pub fn config_path() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var(CONFIG_FILE_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(expand_home(Path::new(trimmed)));
        }
    }
    dirs::config_dir().map(|dir| dir.join("tally").join("config.toml"))
}

fn load_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&text)?))
}

fn default_list_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Other("could not determine home directory".to_string()))?;
    Ok(home.join(DEFAULT_LIST_FILE))
}

/// Expand a leading `~` to the home directory.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
