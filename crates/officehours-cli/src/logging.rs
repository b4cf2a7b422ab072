//! Tracing setup.
//!
//! The terminal view owns stdout, so while it runs logs go to
//! `<data dir>/logs/officehours.log`. One-shot subcommands log to stderr.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use officehours_core::storage::data_dir;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_file() {
    let filter = env_filter("info");

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: drop logs rather than draw over the terminal view, but
    // say why while stderr is still readable.
    report_unlogged(&init_warnings, &mut std::io::stderr());
    tracing_subscriber::registry().with(filter).init();
}

pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter("warn"))
        .init();
}

fn report_unlogged(warnings: &[String], out: &mut impl Write) {
    for warning in warnings {
        let _ = writeln!(out, "warning: {warning} (logging disabled)");
    }
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    let dir = match data_dir() {
        Ok(dir) => dir.join("logs"),
        Err(e) => {
            warnings.push(format!("No data directory for logs: {e}"));
            return (None, warnings);
        }
    };
    if let Err(e) = fs::create_dir_all(&dir) {
        warnings.push(format!("Failed to create log dir {}: {e}", dir.display()));
        return (None, warnings);
    }

    let path = dir.join("officehours.log");
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => (Some((path, file)), warnings),
        Err(e) => {
            warnings.push(format!("Failed to open log file {}: {e}", path.display()));
            (None, warnings)
        }
    }
}
