//! Source checkout and file listing.
//!
//! Clone-or-pull of the remote notes repository, and expansion of the
//! include-pattern file into the ordered list of source paths the pipeline
//! consumes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use globset::{Glob, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::contract::PipelineError;

/// Clone `repo_url` into `local_dir` if no checkout exists there yet,
/// otherwise fast-forward the existing one.
pub fn clone_or_pull(repo_url: &str, local_dir: &Path) -> Result<(), PipelineError> {
    if local_dir.join(".git").exists() {
        run_git(local_dir, &["pull", "--ff-only"])?;
        info!(path = %local_dir.display(), "updated existing checkout");
    } else {
        let status = Command::new("git")
            .arg("clone")
            .arg(repo_url)
            .arg(local_dir)
            .status()?;
        if !status.success() {
            return Err(PipelineError::Git(format!(
                "clone of {repo_url} exited with {status}"
            )));
        }
        info!(repo_url, path = %local_dir.display(), "cloned checkout");
    }
    Ok(())
}

fn run_git(dir: &Path, args: &[&str]) -> Result<(), PipelineError> {
    let status = Command::new("git").arg("-C").arg(dir).args(args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(PipelineError::Git(format!(
            "git {} exited with {status}",
            args.join(" ")
        )))
    }
}

/// Expand the include-pattern file against the checkout tree.
///
/// One glob per line; blank lines and `#` comments are ignored. Traversal is
/// sorted so reruns process files in the same order.
pub fn list_sources(
    checkout_dir: &Path,
    include_file: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    let patterns = fs::read_to_string(include_file)?;
    let mut builder = GlobSetBuilder::new();
    for line in patterns.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let glob = Glob::new(line)
            .map_err(|e| PipelineError::Pattern(format!("bad pattern {line:?}: {e}")))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| PipelineError::Pattern(e.to_string()))?;

    let mut matched = Vec::new();
    let walker = WalkDir::new(checkout_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.map_err(|e| PipelineError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(checkout_dir).unwrap_or(entry.path());
        if set.is_match(rel) {
            matched.push(entry.path().to_path_buf());
        }
    }
    debug!(count = matched.len(), "matched source files");
    Ok(matched)
}
