//! Logging utilities for studentkit

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::constants;

/// Append-only, human readable log of walkthrough activity
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    /// Log file inside `folder`
    pub fn in_folder(folder: &Path) -> Self {
        Self {
            path: folder.join(constants::LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line. Failures are reported and swallowed.
    pub fn append(&self, message: &str) {
        if let Err(e) = self.try_append(message) {
            warn!("Failed to write to log: {}", e);
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        let timestamp = Local::now().format(constants::TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{timestamp}] {message}")
    }
}

/// Create the trace log file requested with `--log-file`
pub fn create_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    println!("Log file created: {}", path.display());

    Ok(log_file)
}
