//! Terminal rendering for the task list using ANSI escape codes.
//!
//! Active tasks are bold red, normal tasks dim, done tasks dim and struck
//! through. The `today` view uses the plain variant.

use crate::models::{Status, TaskEntry};

/// ANSI escape codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const STRIKE: &str = "\x1b[9m";
    pub const RED: &str = "\x1b[31m";
}

use codes::*;

/// Render the full list with status-dependent styling.
///
/// Lines are numbered with the 1-based display index, right-aligned to the
/// width of the largest index, preceded by a blank separator line.
pub fn styled(entries: &[TaskEntry]) -> String {
    render(entries, true)
}

/// Render without any styling.
pub fn plain(entries: &[TaskEntry]) -> String {
    render(entries, false)
}

fn render(entries: &[TaskEntry], colored: bool) -> String {
    let width = index_width(entries.len());
    let mut out = vec![String::new()];
    for entry in entries {
        let line = format!("  {:>width$}. {}", entry.index, entry.text);
        if colored {
            out.push(stylize(&line, entry.status));
        } else {
            out.push(line);
        }
    }
    out.join("\n")
}

fn stylize(line: &str, status: Status) -> String {
    match status {
        Status::Active => format!("{BOLD}{RED}{line}{RESET}"),
        Status::Normal => format!("{DIM}{line}{RESET}"),
        Status::Done => format!("{DIM}{STRIKE}{line}{RESET}"),
    }
}

fn index_width(count: usize) -> usize {
    count.max(1).to_string().len()
}
