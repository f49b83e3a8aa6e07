//! Single-pass driver: classify each source file, dispatch to the prose
//! renderer or the series aggregator, then finalise series state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::{classify, Category};
use crate::contract::{History, OutputDocument, PipelineError, TemplateEngine};
use crate::render;
use crate::series::SeriesState;

/// Outcome of one pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Destination paths of every document written, in write order.
    pub written: Vec<PathBuf>,
    /// Source paths that matched no category.
    pub skipped: Vec<PathBuf>,
}

/// Run the conversion over an ordered list of source files.
///
/// Series state lives only for this invocation; reruns over an unchanged
/// input set (and unchanged history dates) reproduce identical output.
pub fn run(
    sources: &[PathBuf],
    target_dir: &Path,
    history: &dyn History,
    templates: &dyn TemplateEngine,
) -> Result<RunReport, PipelineError> {
    let mut report = RunReport::default();
    let mut state = SeriesState::new();

    for path in sources {
        match classify(&path.to_string_lossy()) {
            Some(Category::Series) => {
                state.contribute(path)?;
            }
            Some(category) => {
                let doc = render::render(category, path, target_dir, history, templates)?;
                write_document(&doc)?;
                info!(src = %path.display(), dest = %doc.dest.display(), "rendered");
                report.written.push(doc.dest);
            }
            None => {
                debug!(path = %path.display(), "unclassified, skipping");
                report.skipped.push(path.clone());
            }
        }
    }

    for doc in state.finalize(target_dir, templates)? {
        write_document(&doc)?;
        info!(dest = %doc.dest.display(), "wrote series document");
        report.written.push(doc.dest);
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "run complete"
    );
    Ok(report)
}

fn write_document(doc: &OutputDocument) -> Result<(), PipelineError> {
    if let Some(parent) = doc.dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&doc.dest, &doc.text)?;
    Ok(())
}
