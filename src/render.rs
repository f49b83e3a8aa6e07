//! One-shot rendering for prose categories (posts, notes, about).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::classify::Category;
use crate::contract::{History, OutputDocument, PipelineError, TemplateEngine, TemplateVars};

/// Render one prose source file into its output document.
pub fn render(
    category: Category,
    path: &Path,
    target_dir: &Path,
    history: &dyn History,
    templates: &dyn TemplateEngine,
) -> Result<OutputDocument, PipelineError> {
    let (created, _last_updated) = history.get_dates(path);
    let dest_name = dest_filename(path);
    let (title, content) = title_and_body(path, &dest_name)?;

    let mut vars = TemplateVars::new();
    vars.insert(
        "created_date".to_string(),
        created.format("%Y-%m-%d").to_string(),
    );
    vars.insert("title".to_string(), title);
    vars.insert("content".to_string(), content);
    let text = templates.render(category.template(), &vars)?;

    let dest = target_dir.join(category.dest()).join(&dest_name);
    debug!(src = %path.display(), dest = %dest.display(), "rendered prose document");
    Ok(OutputDocument { dest, text })
}

/// Destination filename for a prose source. A `readme.md` collapses to its
/// parent directory's name, so a folder of notes becomes one page named
/// after the folder.
fn dest_filename(path: &Path) -> String {
    let basename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if basename.trim().eq_ignore_ascii_case("readme.md") {
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        format!("{parent}.md")
    } else {
        basename.to_string()
    }
}

/// Split a source file into (title, body).
///
/// For markdown, a `# ` heading within the first two lines becomes the title
/// and is dropped from the body. When no title is found it is synthesised
/// from the destination filename.
fn title_and_body(path: &Path, dest_name: &str) -> Result<(String, String), PipelineError> {
    let raw = fs::read_to_string(path)?;
    let mut title = String::new();
    let mut content = String::new();

    if path.extension().and_then(|e| e.to_str()) == Some("md") {
        for (idx, line) in raw.lines().enumerate() {
            if idx < 2 && title.is_empty() {
                if let Some(heading) = line.trim().strip_prefix("# ") {
                    title = capitalize(heading.trim());
                    continue;
                }
            }
            content.push_str(line);
            content.push('\n');
        }
    } else {
        content = raw;
    }

    if title.is_empty() {
        let stem = dest_name.strip_suffix(".md").unwrap_or(dest_name);
        title = capitalize(&stem.replace(['_', '-'], " "));
    }
    Ok((title, content))
}

/// First character upper, the rest lower.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
