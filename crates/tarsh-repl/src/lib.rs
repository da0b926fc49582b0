//! tarsh REPL — interactive shell over a tar-materialized virtual
//! filesystem.
//!
//! Startup wiring (config → archive → tree → interpreter) happens here;
//! a failure in any of those steps propagates out so the binary can exit
//! non-zero. Once the loop is running, nothing short of `exit` or EOF
//! ends the session: failed commands print and re-loop, and Ctrl-C during
//! the blocking read prints a hint instead of quitting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use tarsh_kernel::{archive, ActionJournal, Config, ExecResult, Interpreter, Outcome, VfsTree};

/// Build an interpreter from a config file.
pub fn build_interpreter(config_path: &Path) -> Result<Interpreter> {
    let config = Config::load(config_path)?;
    let entries = archive::read_entries(&config.virtual_fs_path, &config.archive_root)?;
    let tree = VfsTree::from_entries(entries.into_iter().map(|e| (e.path, e.is_dir)));
    let journal = ActionJournal::new(&config.log_file_path);
    Ok(Interpreter::new(tree, journal))
}

/// Run the interactive loop until `exit` or EOF.
pub fn run(config_path: &Path) -> Result<()> {
    let mut interpreter = build_interpreter(config_path)?;

    println!("tarsh v{}", env!("CARGO_PKG_VERSION"));

    let mut rl: Editor<(), DefaultHistory> =
        Editor::new().context("Failed to create editor")?;

    let history_path = directories::BaseDirs::new()
        .map(|b| b.data_dir().join("tarsh").join("history.txt"));
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            // A missing history file is expected on first run.
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    loop {
        match rl.readline(&interpreter.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }
                match interpreter.dispatch(&line) {
                    Outcome::Continue(result) => print_result(&result),
                    Outcome::Exit(result) => {
                        print_result(&result);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("use \"exit\" to leave the shell");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}

/// Print a command result: `out` to stdout, `err` to stderr.
fn print_result(result: &ExecResult) {
    if !result.out.is_empty() {
        println!("{}", result.out);
    }
    if !result.err.is_empty() {
        eprintln!("{}", result.err);
    }
}

/// Save REPL history to disk, creating the directory if needed.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}
