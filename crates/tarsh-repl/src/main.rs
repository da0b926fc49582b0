//! tarsh CLI entry point.
//!
//! Usage:
//!   tarsh                  # Interactive shell, config from ./config.json
//!   tarsh <config.json>    # Interactive shell with an explicit config

use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            tarsh_repl::run(Path::new(DEFAULT_CONFIG))?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("tarsh {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some(path) if !path.starts_with('-') => {
            tarsh_repl::run(Path::new(path))?;
            Ok(ExitCode::SUCCESS)
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'tarsh --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        r#"tarsh v{} — shell over a tar-materialized virtual filesystem

Usage:
  tarsh                  Interactive shell (config: ./{DEFAULT_CONFIG})
  tarsh <config.json>    Interactive shell with an explicit config

Options:
  -h, --help             Show this help
  -V, --version          Show version

Config file (JSON):
  virtual_fs_path        Path to the tar archive to materialize
  log_file_path          Path of the JSON action log
  archive_root           Wrapper directory inside the archive
                         (optional, default "virtual_fs")

Commands inside the shell:
  ls [path]              List a directory (name and owner per entry)
  cd [path]              Change directory (no args or / for root, .. up)
  chown <owner> <path>   Change an entry's owner
  date                   Current date and time
  uptime                 Time since the session started
  exit                   Leave the shell
"#,
        env!("CARGO_PKG_VERSION")
    );
}
