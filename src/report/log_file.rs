use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

pub const SEPARATOR: &str = "==============================================================";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub enum LogEvent<'a> {
    Started { domain: &'a str },
    Unchanged { name: &'a str, ip: Ipv4Addr },
    Updated { name: &'a str, ip: Ipv4Addr },
    Failed { name: &'a str, ip: Ipv4Addr, error: &'a str },
    Completed { domain: &'a str, changed: bool },
    Error(&'a str),
    Separator,
}

impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Started { domain } => write!(f, "STARTING UPDATE: {}", domain),
            LogEvent::Unchanged { name, ip } => {
                write!(f, "UNCHANGED: {} already points to {}.", name, ip)
            }
            LogEvent::Updated { name, ip } => write!(f, "UPDATED: {} -> {}.", name, ip),
            LogEvent::Failed { name, ip, error } => {
                write!(f, "ERROR: Failed to update {} -> {} - {}.", name, ip, error)
            }
            LogEvent::Completed { domain, changed: true } => {
                write!(f, "COMPLETED UPDATE: {} (with changes)", domain)
            }
            LogEvent::Completed { domain, changed: false } => {
                write!(f, "COMPLETED UPDATE: {} (no changes)", domain)
            }
            LogEvent::Error(message) => write!(f, "ERROR: {}", message),
            LogEvent::Separator => f.write_str(SEPARATOR),
        }
    }
}

/// Append-only run log.
///
/// The file is opened for every line and closed again, so nothing is held
/// open across network calls. Failures to write are reported on stderr and
/// otherwise ignored.
#[derive(Debug, Clone)]
pub struct OutcomeLog {
    path: PathBuf,
}

impl OutcomeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event: &LogEvent<'_>) {
        if let Err(e) = self.try_append(event) {
            tracing::warn!("Could not write to {}: {}", self.path.display(), e);
        }
    }

    pub fn try_append(&self, event: &LogEvent<'_>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{} - {}", Local::now().format(TIMESTAMP_FORMAT), event)?;
        Ok(())
    }

    /// Write the separator line when the returned guard goes out of scope.
    pub fn run_guard(&self) -> RunGuard<'_> {
        RunGuard { log: self }
    }
}

/// Closes a run in the log with the separator line, however the run ends.
#[derive(Debug)]
pub struct RunGuard<'a> {
    log: &'a OutcomeLog,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.log.append(&LogEvent::Separator);
    }
}
