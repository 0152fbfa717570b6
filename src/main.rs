//! Tally CLI - a personal task list in a single text file.

use clap::Parser;
use std::process;
use std::time::Instant;

use tally::cli::{Cli, Commands};
use tally::commands::{self, Output};
use tally::config::Settings;
use tally::storage::Store;
use tally::{action_log, sys};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    // Resolve configuration once: --file flag (or TALLY_FILE) > config file >
    // defaults. Everything downstream takes the settings explicitly.
    let settings = match Settings::resolve(cli.file) {
        Ok(settings) => settings,
        Err(err) => report_error(&err, json),
    };

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Start timing
    let start = Instant::now();

    // Execute command
    let result = run_command(cli.command, &settings, json);

    // Calculate duration
    let duration = start.elapsed().as_millis() as u64;

    // Determine success/error
    let (success, error) = match &result {
        Ok(()) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    };

    // Log the action (silently fails if logging is disabled or encounters errors)
    let _ = action_log::log_action(&settings, cmd_name, args_json, success, error, duration);

    // Handle result
    if let Err(err) = result {
        report_error(&err, json);
    }
}

fn run_command(command: Option<Commands>, settings: &Settings, json: bool) -> tally::Result<()> {
    let store = Store::new(settings.list_path.clone(), settings.policy);

    match command {
        None => output(&commands::list(&store)?, json),

        Some(Commands::Add { text }) => output(&commands::add(&store, &text)?, json),

        Some(Commands::Today) => output(&commands::today(&store)?, json),

        Some(Commands::Flush) => output(&commands::flush(&store)?, json),

        Some(Commands::Undo) => output(&commands::undo(&store)?, json),

        Some(Commands::Open) => {
            output(&commands::open(&store, sys::open_with_default)?, json);
        }

        Some(Commands::Edit) => {
            let editor = sys::resolve_editor(settings.editor.as_deref());
            let result = commands::edit(&store, |path| sys::launch_editor(&editor, path))?;
            output(&result, json);
        }

        Some(Commands::Config) => output(&commands::show_config(settings)?, json),

        Some(Commands::Mark(args)) => output(&commands::mark(&store, &args)?, json),
    }

    Ok(())
}

fn serialize_command(command: &Option<Commands>) -> (&'static str, serde_json::Value) {
    match command {
        None => ("list", serde_json::json!({})),
        Some(Commands::Add { text }) => ("add", serde_json::json!({ "text": text })),
        Some(Commands::Today) => ("today", serde_json::json!({})),
        Some(Commands::Flush) => ("flush", serde_json::json!({})),
        Some(Commands::Undo) => ("undo", serde_json::json!({})),
        Some(Commands::Open) => ("open", serde_json::json!({})),
        Some(Commands::Edit) => ("edit", serde_json::json!({})),
        Some(Commands::Config) => ("config", serde_json::json!({})),
        Some(Commands::Mark(args)) => ("mark", serde_json::json!({ "args": args })),
    }
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

fn report_error(err: &tally::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": err.to_string() }));
    } else {
        eprintln!("Error: {}", err);
    }
    process::exit(1);
}
