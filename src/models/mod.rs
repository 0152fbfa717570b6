//! Data models for the task list.
//!
//! This module defines the core data structures:
//! - `Status` - the three-state task lifecycle (`+` active, `-` normal, `x` done)
//! - `Task` - one persisted line: a status marker plus free-form text
//! - `TaskList` - the ordered collection with the priority sort and 1-based
//!   display indices

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Task status in the lifecycle.
///
/// Any status may transition to any other; none is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Prioritized, shown first (`+`)
    Active,
    /// Default for new tasks (`-`)
    #[default]
    Normal,
    /// Completed (`x`)
    Done,
}

impl Status {
    /// Parse a status marker character.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '+' => Some(Status::Active),
            '-' => Some(Status::Normal),
            'x' => Some(Status::Done),
            _ => None,
        }
    }

    /// The marker character used in the persisted file.
    pub fn marker(self) -> char {
        match self {
            Status::Active => '+',
            Status::Normal => '-',
            Status::Done => 'x',
        }
    }

    /// Sort rank: Active before Normal before Done.
    fn rank(self) -> u8 {
        match self {
            Status::Active => 0,
            Status::Normal => 1,
            Status::Done => 2,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A line whose first character is not a recognized status marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line has no status marker: {0:?}")]
pub struct MalformedLine(pub String);

/// One task: a status and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub status: Status,
    pub text: String,
}

impl Task {
    /// Create a task with the default `Normal` status.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_status(Status::default(), text)
    }

    pub fn with_status(status: Status, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// Decode one persisted line.
    ///
    /// Strict: the first character must be a recognized marker. Callers that
    /// want to tolerate hand-edited files decide their own fallback (see
    /// [`TaskList::from_lines`]).
    pub fn decode(line: &str) -> std::result::Result<Self, MalformedLine> {
        let mut chars = line.chars();
        let marker = chars.next().ok_or_else(|| MalformedLine(line.to_string()))?;
        let status = Status::from_marker(marker).ok_or_else(|| MalformedLine(line.to_string()))?;
        Ok(Self {
            status,
            text: chars.as_str().trim().to_string(),
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.marker(), self.text)
    }
}

/// A display row: the 1-based index plus the task fields.
///
/// Indices are recomputed from list position on every read; they are a view,
/// not a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub index: usize,
    pub status: Status,
    pub text: String,
}

/// Split a leading status marker off user-supplied task text.
///
/// The marker only counts when it is the entire first token (`"x buy milk"`),
/// so a word that merely starts with a marker character ("xylophone") is left
/// alone.
pub fn split_leading_marker(input: &str) -> (Option<Status>, &str) {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    if let Some(first) = chars.next() {
        if let Some(status) = Status::from_marker(first) {
            let rest = chars.as_str();
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return (Some(status), rest.trim_start());
            }
        }
    }
    (None, trimmed)
}

/// The ordered task collection.
///
/// Tasks are always kept grouped by status in priority order (Active, Normal,
/// Done), stable within each group. The 1-based display index of a task is its
/// position, so indices are contiguous by construction and may change after
/// any mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Build a list from persisted lines and apply the priority sort.
    ///
    /// Blank lines are dropped. A malformed line (no status marker) is
    /// normalized to a `Normal` task whose text is the whole trimmed line.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tasks = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| {
                let line = line.as_ref();
                Task::decode(line).unwrap_or_else(|_| Task::new(line.trim()))
            })
            .collect();
        let mut list = Self { tasks };
        list.sort();
        list
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Stable partition into Active, Normal, Done. Idempotent.
    pub fn sort(&mut self) {
        self.tasks.sort_by_key(|task| task.status.rank());
    }

    /// Remove every task whose status is in `remove`. Returns how many were
    /// dropped; matching nothing is a no-op.
    pub fn flush(&mut self, remove: &[Status]) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !remove.contains(&task.status));
        before - self.tasks.len()
    }

    /// Replace the status of the task at the given 1-based display index,
    /// leaving its text unchanged, then re-sort. Other tasks' indices may
    /// change as a result.
    pub fn set_status(&mut self, index: usize, status: Status) -> Result<()> {
        if index == 0 || index > self.tasks.len() {
            return Err(Error::IndexNotFound(index));
        }
        self.tasks[index - 1].status = status;
        self.sort();
        Ok(())
    }

    /// Insert a task ahead of all existing ones, then re-sort, so it lands
    /// first within its status group.
    pub fn add(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.sort();
    }

    /// The display rows in sorted order, indices `1..=len`.
    pub fn entries(&self) -> Vec<TaskEntry> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(position, task)| TaskEntry {
                index: position + 1,
                status: task.status,
                text: task.text.clone(),
            })
            .collect()
    }

    /// Encode back to persisted lines, one per task, in order.
    pub fn to_lines(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_string).collect()
    }
}
