//! Command implementations for the tally CLI.
//!
//! Each command loads the list fresh from the store, mutates it in memory,
//! and (for mutating commands) saves it back before returning. Results are
//! plain structs that can render themselves as JSON or human-readable text;
//! the binary stays a thin dispatch layer.

use serde::Serialize;
use std::io;
use std::path::Path;

use crate::config::Settings;
use crate::models::{Status, Task, TaskEntry, TaskList, split_leading_marker};
use crate::render;
use crate::storage::{BackupPolicy, Store};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// The current list, sorted, with display indices.
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub count: usize,
    pub tasks: Vec<TaskEntry>,
}

impl ListResult {
    fn new(list: &TaskList) -> Self {
        Self {
            count: list.len(),
            tasks: list.entries(),
        }
    }
}

impl Output for ListResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        render::styled(&self.tasks)
    }
}

/// The active-only view. Indices are recomputed against the filtered view.
#[derive(Debug, Serialize)]
pub struct TodayResult {
    pub count: usize,
    pub tasks: Vec<TaskEntry>,
}

impl Output for TodayResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        render::plain(&self.tasks)
    }
}

/// Result of `flush`: what remains plus how many tasks were dropped.
#[derive(Debug, Serialize)]
pub struct FlushResult {
    pub removed: usize,
    pub count: usize,
    pub tasks: Vec<TaskEntry>,
}

impl Output for FlushResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        render::styled(&self.tasks)
    }
}

/// Result of `open`.
#[derive(Debug, Serialize)]
pub struct OpenResult {
    pub path: String,
}

impl Output for OpenResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!("Opened {}", self.path)
    }
}

/// The resolved configuration, for `ty config`.
#[derive(Debug, Serialize)]
pub struct ConfigResult {
    pub list_path: String,
    pub backups: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_bound: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    pub action_log: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_log_path: Option<String>,
}

impl Output for ConfigResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut out = vec![
            format!("list:       {}", self.list_path),
            match self.backup_bound {
                Some(bound) => format!("backups:    {} (bound {})", self.backups, bound),
                None => format!("backups:    {}", self.backups),
            },
        ];
        if let Some(editor) = &self.editor {
            out.push(format!("editor:     {}", editor));
        }
        out.push(format!(
            "action log: {}",
            if self.action_log { "enabled" } else { "disabled" }
        ));
        out.join("\n")
    }
}

/// Print the full list. Read-only.
pub fn list(store: &Store) -> Result<ListResult> {
    let list = TaskList::from_lines(store.load()?);
    Ok(ListResult::new(&list))
}

/// Add a task. A leading status-marker token in the text overrides the
/// default `-` status.
pub fn add(store: &Store, words: &[String]) -> Result<ListResult> {
    if words.is_empty() {
        return Err(Error::MissingArgument("task text".to_string()));
    }
    let input = words.join(" ");
    let (status, text) = split_leading_marker(&input);
    if text.is_empty() {
        return Err(Error::MissingArgument("task text".to_string()));
    }

    let mut list = TaskList::from_lines(store.load()?);
    list.add(Task::with_status(status.unwrap_or_default(), text));
    store.save(&list.to_lines())?;
    Ok(ListResult::new(&list))
}

/// Show only the active tasks. Read-only; the filtered view is not saved.
pub fn today(store: &Store) -> Result<TodayResult> {
    let mut list = TaskList::from_lines(store.load()?);
    list.flush(&[Status::Normal, Status::Done]);
    Ok(TodayResult {
        count: list.len(),
        tasks: list.entries(),
    })
}

/// Drop completed tasks and save.
pub fn flush(store: &Store) -> Result<FlushResult> {
    let mut list = TaskList::from_lines(store.load()?);
    let removed = list.flush(&[Status::Done]);
    store.save(&list.to_lines())?;
    Ok(FlushResult {
        removed,
        count: list.len(),
        tasks: list.entries(),
    })
}

/// Restore the most recent backup and show the result. The restore is not
/// itself backed up, so chained undos walk further back.
pub fn undo(store: &Store) -> Result<ListResult> {
    let list = TaskList::from_lines(store.undo()?);
    Ok(ListResult::new(&list))
}

/// Apply a status-change pattern: `3x`, `x3`, or `3 done`.
pub fn mark(store: &Store, args: &[String]) -> Result<ListResult> {
    let first = args.first().map(String::as_str).unwrap_or_default();

    if let Some((index, status)) = parse_compact(first) {
        return set_status(store, index, status);
    }

    if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = first
            .parse()
            .map_err(|_| Error::UnknownCommand(first.to_string()))?;
        let instruction = args
            .get(1)
            .ok_or_else(|| Error::MissingArgument(format!("instruction for task {index}")))?;
        let status = parse_instruction(instruction)
            .ok_or_else(|| Error::UnknownCommand(instruction.clone()))?;
        return set_status(store, index, status);
    }

    Err(Error::UnknownCommand(args.join(" ")))
}

/// Open the list with the injected file opener.
pub fn open(store: &Store, launch: impl FnOnce(&Path) -> io::Result<()>) -> Result<OpenResult> {
    store.load()?;
    launch(store.path())?;
    Ok(OpenResult {
        path: store.path().display().to_string(),
    })
}

/// Run the injected editor on the list, then reload and show it. The editor
/// writes the file itself, so nothing is saved here.
pub fn edit(store: &Store, launch: impl FnOnce(&Path) -> io::Result<()>) -> Result<ListResult> {
    store.load()?;
    launch(store.path())?;
    let list = TaskList::from_lines(store.load()?);
    Ok(ListResult::new(&list))
}

/// Show the resolved configuration.
pub fn show_config(settings: &Settings) -> Result<ConfigResult> {
    let (backups, backup_bound) = match settings.policy {
        BackupPolicy::Rotating { bound } => ("rotating".to_string(), Some(bound)),
        BackupPolicy::Timestamped => ("timestamped".to_string(), None),
    };
    Ok(ConfigResult {
        list_path: settings.list_path.display().to_string(),
        backups,
        backup_bound,
        editor: settings.editor.clone(),
        action_log: settings.action_log,
        action_log_path: settings
            .action_log_path
            .as_ref()
            .map(|path| path.display().to_string()),
    })
}

fn set_status(store: &Store, index: usize, status: Status) -> Result<ListResult> {
    let mut list = TaskList::from_lines(store.load()?);
    list.set_status(index, status)?;
    store.save(&list.to_lines())?;
    Ok(ListResult::new(&list))
}

/// Parse `<digits><marker>` or `<marker><digits>`.
fn parse_compact(arg: &str) -> Option<(usize, Status)> {
    if let Some(last) = arg.chars().last() {
        if let Some(status) = Status::from_marker(last) {
            let digits = &arg[..arg.len() - last.len_utf8()];
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return digits.parse().ok().map(|index| (index, status));
            }
        }
    }
    let mut chars = arg.chars();
    if let Some(first) = chars.next() {
        if let Some(status) = Status::from_marker(first) {
            let digits = chars.as_str();
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return digits.parse().ok().map(|index| (index, status));
            }
        }
    }
    None
}

/// Map an instruction word to a status.
fn parse_instruction(word: &str) -> Option<Status> {
    match word {
        "x" | "done" => Some(Status::Done),
        "+" | "today" | "now" | "top" => Some(Status::Active),
        "-" | "later" => Some(Status::Normal),
        _ => None,
    }
}
