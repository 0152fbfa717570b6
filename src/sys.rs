//! Shell-outs to the platform editor and file opener.
//!
//! Everything here is selected at the boundary and handed into the command
//! layer as a plain function, so the command implementations carry no
//! platform conditionals.

use std::io;
use std::path::Path;
use std::process::Command;

/// Pick the editor command: configured value, then `$VISUAL`, then `$EDITOR`,
/// then `vi`.
pub fn resolve_editor(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| env_nonempty("VISUAL"))
        .or_else(|| env_nonempty("EDITOR"))
        .unwrap_or_else(|| "vi".to_string())
}

/// Run the editor on the given file and wait for it to exit.
///
/// The editor value may carry arguments ("code --wait").
pub fn launch_editor(editor: &str, path: &Path) -> io::Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program).args(parts).arg(path).status()?;
    if !status.success() {
        return Err(io::Error::other(format!("editor exited with {status}")));
    }
    Ok(())
}

/// Open the file with the platform's default opener.
#[cfg(target_os = "macos")]
pub fn open_with_default(path: &Path) -> io::Result<()> {
    run_opener(Command::new("open").arg(path))
}

/// Open the file with the platform's default opener.
#[cfg(target_os = "windows")]
pub fn open_with_default(path: &Path) -> io::Result<()> {
    run_opener(Command::new("cmd").args(["/C", "start", ""]).arg(path))
}

/// Open the file with the platform's default opener.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn open_with_default(path: &Path) -> io::Result<()> {
    run_opener(Command::new("xdg-open").arg(path))
}

fn run_opener(command: &mut Command) -> io::Result<()> {
    let status = command.status()?;
    if !status.success() {
        return Err(io::Error::other(format!("opener exited with {status}")));
    }
    Ok(())
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
