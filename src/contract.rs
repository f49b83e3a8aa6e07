//! Collaborator interfaces for the conversion pipeline.
//!
//! The core engine needs two things it does not implement itself: commit
//! history for a file (created/last-updated dates) and named-template
//! rendering. Both live behind traits so tests can substitute deterministic
//! mocks; production implementations are in [`crate::history`] and
//! [`crate::template`].
//!
//! The traits are annotated for `mockall` so consumers can generate
//! deterministic mocks for unit/integration tests (exported under the
//! `test-export-mocks` feature).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use mockall::automock;

/// Variables handed to the template engine. String-to-string only; the
/// engine never sees richer structures.
pub type TemplateVars = BTreeMap<String, String>;

/// A rendered document and where it belongs on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub dest: PathBuf,
    pub text: String,
}

/// Commit-history lookup for a single file.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait History: Send + Sync {
    /// Returns `(created, last_updated)` for the file. A file with no
    /// recorded history is treated as newly authored: both values are now.
    fn get_dates(&self, path: &Path) -> (DateTime<Local>, DateTime<Local>);
}

/// Named-template rendering: given a template name and a variable map,
/// produce a text blob.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String, TemplateError>;
}

#[derive(Debug)]
pub struct TemplateError(pub String);

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TemplateError {}

/// Fatal errors for one pipeline run. Unclassifiable inputs and unmatched
/// item-number patterns are not errors; they are logged and skipped.
#[derive(Debug)]
pub enum PipelineError {
    Io(std::io::Error),
    Template(TemplateError),
    Git(String),
    Pattern(String),
    /// A path classified as a series contribution but lacking a `book-notes`
    /// segment. This is a caller bug, never silently keyed on an empty
    /// series id.
    MissingBookSegment(PathBuf),
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::Io(e)
    }
}

impl From<TemplateError> for PipelineError {
    fn from(e: TemplateError) -> Self {
        PipelineError::Template(e)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "i/o error: {e}"),
            PipelineError::Template(e) => write!(f, "template error: {e}"),
            PipelineError::Git(msg) => write!(f, "git: {msg}"),
            PipelineError::Pattern(msg) => write!(f, "include pattern: {msg}"),
            PipelineError::MissingBookSegment(path) => {
                write!(f, "series path {} has no book-notes segment", path.display())
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io(e) => Some(e),
            PipelineError::Template(e) => Some(e),
            _ => None,
        }
    }
}
