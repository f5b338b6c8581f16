use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, ScoutError};

/// Where log lines go.
pub enum LogTarget {
    /// Plain stderr, for one-shot CLI commands.
    Stderr,
    /// Append-only file, so the TUI's alternate screen stays clean.
    File(PathBuf),
}

/// Default log file for TUI sessions (~/.scout/scout.log)
pub fn default_log_file() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".scout").join("scout.log"))
        .ok_or_else(|| ScoutError::Config("could not find home directory".to_string()))
}

/// Install the global subscriber. Filter comes from `SCOUT_LOG`, default `info`.
pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env("SCOUT_LOG").unwrap_or_else(|_| "info".into());

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| ScoutError::Config(e.to_string()))?;
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| ScoutError::Config(e.to_string()))?;
        }
    }

    Ok(())
}
