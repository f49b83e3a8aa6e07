use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Build configuration: where the source checkout lives, which files to
/// include, and where output goes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Local checkout of the notes repository.
    pub checkout_dir: PathBuf,
    /// Remote to clone/pull the checkout from. When absent the checkout is
    /// used as-is (useful for tests and offline runs).
    #[serde(default)]
    pub repo_url: Option<String>,
    /// File of include patterns, one glob per line.
    pub include_file: PathBuf,
    /// Root of the generated content tree.
    pub target_dir: PathBuf,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            checkout_dir = %self.checkout_dir.display(),
            include_file = %self.include_file.display(),
            target_dir = %self.target_dir.display(),
            repo_url = self.repo_url.as_deref().unwrap_or("<none>"),
            "Loaded Config"
        );
    }
}
