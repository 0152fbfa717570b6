//! Persistence for the task list file and its backups.
//!
//! The live list is one UTF-8 text file, one task per line. Next to it the
//! store keeps a chain of prior snapshots under one of two policies:
//!
//! - **Rotating** (default): at most `bound` generations named
//!   `{stem}-backup-{N}{suffix}`, where generation 1 is the most recently
//!   saved prior state. Every save shifts the chain one slot toward the
//!   oldest before the live file is replaced.
//! - **Timestamped**: a snapshot named `{stem}_{YYYY-MM-DD-HH:MM:SS}{suffix}`
//!   is copied on every load, giving an unbounded append-only history.
//!
//! Backups are best-effort: a missing generation during rotation is benign,
//! and the live file is only ever replaced atomically (temp file + rename) as
//! the last step of a save, so an interrupted rotation cannot corrupt it.
//!
//! There is deliberately no locking between invocations; with two concurrent
//! writers the last save wins.

use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Default number of rotating backup generations to retain.
pub const DEFAULT_BACKUP_BOUND: u32 = 100;

/// How backups of the live file are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPolicy {
    /// Keep at most `bound` generations, rotated on every save.
    Rotating { bound: u32 },
    /// Snapshot the file on every load, never prune.
    Timestamped,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        BackupPolicy::Rotating {
            bound: DEFAULT_BACKUP_BOUND,
        }
    }
}

/// Store for a single task list file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    policy: BackupPolicy,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>, policy: BackupPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Path of the live list file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> BackupPolicy {
        self.policy
    }

    /// Read the live file, creating it (and its parent directories) first if
    /// absent. Under the timestamped policy a snapshot is copied before the
    /// contents are returned, on every load.
    ///
    /// Returns the file's lines with trailing whitespace trimmed, in order,
    /// dropping nothing.
    pub fn load(&self) -> Result<Vec<String>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            fs::write(&self.path, "")?;
        }
        if self.policy == BackupPolicy::Timestamped {
            fs::copy(&self.path, self.snapshot_path())?;
        }
        self.read_lines()
    }

    /// Persist the given lines, newline-joined with no trailing newline.
    ///
    /// Under the rotating policy the backup chain is shifted first; the live
    /// file is replaced atomically as the final step.
    pub fn save(&self, lines: &[String]) -> Result<()> {
        if let BackupPolicy::Rotating { bound } = self.policy {
            self.rotate_backups(bound)?;
        }
        self.replace_live(&lines.join("\n"))
    }

    /// Restore the most recent backup into the live file and return its
    /// lines. Consumes one generation per call, so chained calls walk further
    /// back through history. The restore itself is never backed up.
    pub fn undo(&self) -> Result<Vec<String>> {
        match self.policy {
            BackupPolicy::Rotating { .. } => self.undo_rotating(),
            BackupPolicy::Timestamped => self.undo_timestamped(),
        }
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect())
    }

    fn replace_live(&self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(&self.path).map_err(|err| Error::Io(err.error))?;
        Ok(())
    }

    /// Shift every generation one slot toward the oldest (dropping the one
    /// past the bound), then copy the live file into generation 1. Missing
    /// generations are skipped; sparse history is fine.
    fn rotate_backups(&self, bound: u32) -> Result<()> {
        if bound == 0 {
            return Ok(());
        }
        for generation in (1..bound).rev() {
            copy_if_exists(
                &self.backup_path(generation),
                &self.backup_path(generation + 1),
            )?;
        }
        copy_if_exists(&self.path, &self.backup_path(1))?;
        Ok(())
    }

    fn undo_rotating(&self) -> Result<Vec<String>> {
        let backups = self.backups()?;
        let newest = backups.first().ok_or(Error::NoBackup)?;
        fs::copy(&newest.1, &self.path)?;
        // Close the gap: each remaining generation moves one slot toward the
        // restored end, and the now-duplicate oldest slot is dropped.
        for pair in backups.windows(2) {
            fs::copy(&pair[1].1, &pair[0].1)?;
        }
        if let Some(oldest) = backups.last() {
            fs::remove_file(&oldest.1)?;
        }
        self.read_lines()
    }

    fn undo_timestamped(&self) -> Result<Vec<String>> {
        let snapshots = self.snapshots()?;
        let newest = snapshots.last().ok_or(Error::NoBackup)?;
        fs::copy(newest, &self.path)?;
        fs::remove_file(newest)?;
        self.read_lines()
    }

    /// The rotating generations that exist on disk, sorted newest (smallest
    /// generation number) first. Numbering may be sparse.
    fn backups(&self) -> Result<Vec<(u32, PathBuf)>> {
        let (stem, suffix) = self.stem_and_suffix();
        let prefix = format!("{stem}-backup-");
        let mut found = Vec::new();
        let Some(entries) = self.read_sibling_dir()? else {
            return Ok(found);
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Some(number) = rest.strip_suffix(&suffix) else {
                continue;
            };
            if let Ok(generation) = number.parse::<u32>() {
                found.push((generation, entry.path()));
            }
        }
        found.sort_by_key(|(generation, _)| *generation);
        Ok(found)
    }

    /// The timestamped snapshots that exist on disk, sorted oldest first
    /// (the timestamp format sorts lexicographically).
    fn snapshots(&self) -> Result<Vec<PathBuf>> {
        let (stem, suffix) = self.stem_and_suffix();
        let prefix = format!("{stem}_");
        let mut found = Vec::new();
        let Some(entries) = self.read_sibling_dir()? else {
            return Ok(found);
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.strip_prefix(&prefix).is_some_and(|rest| rest.ends_with(&suffix)) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Entries of the directory the live file sits in; `None` when that
    /// directory doesn't exist yet (no history possible).
    fn read_sibling_dir(&self) -> Result<Option<fs::ReadDir>> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        match fs::read_dir(dir) {
            Ok(entries) => Ok(Some(entries)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn backup_path(&self, generation: u32) -> PathBuf {
        let (stem, suffix) = self.stem_and_suffix();
        self.path
            .with_file_name(format!("{stem}-backup-{generation}{suffix}"))
    }

    fn snapshot_path(&self) -> PathBuf {
        let (stem, suffix) = self.stem_and_suffix();
        let timestamp = Local::now().format("%Y-%m-%d-%H:%M:%S");
        self.path.with_file_name(format!("{stem}_{timestamp}{suffix}"))
    }

    fn stem_and_suffix(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = self
            .path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (stem, suffix)
    }
}

/// Copy `src` to `dst`, treating a missing source as a benign no-op.
fn copy_if_exists(src: &Path, dst: &Path) -> Result<bool> {
    match fs::copy(src, dst) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
