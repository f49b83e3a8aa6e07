//! Git-backed commit-history lookup.
//!
//! Shells out to the `git` binary the same way the checkout step does; no
//! libgit2 binding is worth carrying for two date fields.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use crate::contract::History;

pub struct GitHistory {
    checkout_dir: PathBuf,
}

impl GitHistory {
    pub fn new(checkout_dir: impl Into<PathBuf>) -> Self {
        Self {
            checkout_dir: checkout_dir.into(),
        }
    }

    /// Author timestamps for every commit touching `path`, newest first.
    fn author_epochs(&self, path: &Path) -> Option<Vec<i64>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.checkout_dir)
            .args(["log", "--format=%at", "--"])
            .arg(path)
            .output()
            .ok()?;
        if !output.status.success() {
            warn!(path = %path.display(), status = ?output.status, "git log failed");
            return None;
        }
        let epochs: Vec<i64> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.trim().parse().ok())
            .collect();
        if epochs.is_empty() {
            None
        } else {
            Some(epochs)
        }
    }
}

impl History for GitHistory {
    fn get_dates(&self, path: &Path) -> (DateTime<Local>, DateTime<Local>) {
        match self.author_epochs(path) {
            Some(epochs) => {
                // Newest first: the last entry is the creating commit.
                let created = Local.timestamp_opt(epochs[epochs.len() - 1], 0).single();
                let updated = Local.timestamp_opt(epochs[0], 0).single();
                match (created, updated) {
                    (Some(created), Some(updated)) => (created, updated),
                    _ => (Local::now(), Local::now()),
                }
            }
            None => {
                // No committed history: the file is newly authored in this
                // run, so both dates are now.
                debug!(path = %path.display(), "no commit history for file");
                (Local::now(), Local::now())
            }
        }
    }
}
