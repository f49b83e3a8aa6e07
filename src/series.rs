//! Aggregation of "Effective" book-note series.
//!
//! A numbered item's title, prose and code snippet arrive in separate source
//! files, in whatever order the driver feeds them: notes files carry titles
//! and prose for a run of items, snippet files sit in per-item directories.
//! This module merges the contributions into one record per
//! (series, item number) and finalises the merged records into per-item
//! documents plus one table of contents per series.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::classify::{self, Category};
use crate::contract::{OutputDocument, PipelineError, TemplateEngine, TemplateVars};

/// Where per-series table-of-contents documents go, distinct from the
/// per-item destination.
pub const TOC_DEST: &str = "content/notes";

/// One numbered item, merged across contributing files.
///
/// Merge semantics per field: title is last-wins, prose and snippet text
/// accumulate, snippet language is set once and kept on conflict.
#[derive(Debug, Default, Clone)]
pub struct ItemRecord {
    pub title: Option<String>,
    pub prose: String,
    pub snippet_lang: Option<&'static str>,
    pub snippet: String,
}

/// Per-run accumulation state: (series id, item number) -> record.
///
/// Owned by one pipeline invocation and discarded after [`finalize`]
/// consumes it. `BTreeMap` keys keep finalisation ordered by ascending item
/// number without a separate sort.
///
/// [`finalize`]: SeriesState::finalize
#[derive(Debug, Default)]
pub struct SeriesState {
    series: BTreeMap<String, BTreeMap<u32, ItemRecord>>,
}

/// Leading `it<N>` pattern on a file or directory basename.
fn item_number(stem: &str) -> Option<u32> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^it(\d+)").expect("valid item pattern"));
    re.captures(stem).and_then(|caps| caps[1].parse().ok())
}

/// Extension -> (canonical fence language, line-comment prefix).
fn snippet_language(ext: &str) -> Option<(&'static str, &'static str)> {
    match ext {
        "cpp" | "cc" | "cxx" | "h" | "hpp" => Some(("cpp", "//")),
        "js" => Some(("js", "//")),
        "java" => Some(("java", "//")),
        "rs" => Some(("rust", "//")),
        "py" => Some(("python", "#")),
        "sh" => Some(("bash", "#")),
        _ => None,
    }
}

/// The series id is the path segment immediately after the literal
/// `book-notes` segment. Its absence on a series-classified path is a
/// caller bug and aborts the run.
pub fn series_id(path: &Path) -> Result<String, PipelineError> {
    let mut segments = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy());
    while let Some(segment) = segments.next() {
        if segment == "book-notes" {
            if let Some(series) = segments.next() {
                return Ok(series.into_owned());
            }
            break;
        }
    }
    Err(PipelineError::MissingBookSegment(path.to_path_buf()))
}

impl SeriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one source file into the state. Files whose basename (or parent
    /// directory, for snippets) does not match the `it<N>` pattern are
    /// skipped with a warning; I/O failures and a missing `book-notes`
    /// segment are fatal.
    pub fn contribute(&mut self, path: &Path) -> Result<(), PipelineError> {
        let series = series_id(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if ext == "md" {
            let content = fs::read_to_string(path)?;
            self.contribute_notes(path, &series, &content);
        } else if let Some((lang, comment)) = snippet_language(ext) {
            let content = fs::read_to_string(path)?;
            self.contribute_snippet(path, &series, &content, lang, comment);
        } else {
            warn!(path = %path.display(), "unrecognised series file extension, skipping");
        }
        Ok(())
    }

    fn record(&mut self, series: &str, item: u32) -> &mut ItemRecord {
        self.series
            .entry(series.to_string())
            .or_default()
            .entry(item)
            .or_default()
    }

    /// A notes file carries titles and prose for a run of items starting at
    /// the number in its basename. Each `### ` heading starts the next item
    /// and sets its title; lines before the first heading are front matter
    /// and are dropped.
    fn contribute_notes(&mut self, path: &Path, series: &str, content: &str) {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let Some(start) = item_number(stem) else {
            warn!(path = %path.display(), "notes file does not match item pattern, skipping");
            return;
        };
        // The first heading encountered bumps this back to the file's own
        // starting number.
        let mut current = start.saturating_sub(1);
        let mut started = false;
        for line in content.lines() {
            if let Some(heading) = line.strip_prefix("### ") {
                current += 1;
                started = true;
                // A later notes file re-titling this item wins outright;
                // prose still accumulates below.
                self.record(series, current).title = Some(heading.trim().to_string());
            } else if started {
                let record = self.record(series, current);
                record.prose.push_str(line);
                record.prose.push('\n');
            }
        }
        debug!(series, path = %path.display(), "aggregated notes file");
    }

    /// A snippet file contributes to the item named by its parent
    /// directory. Each contribution appends a comment header naming the
    /// source file, the full content, and a blank line — in pipeline
    /// processing order, never sorted.
    fn contribute_snippet(
        &mut self,
        path: &Path,
        series: &str,
        content: &str,
        lang: &'static str,
        comment: &'static str,
    ) {
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let Some(item) = item_number(parent) else {
            warn!(path = %path.display(), "snippet directory does not match item pattern, skipping");
            return;
        };
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        let record = self.record(series, item);
        match record.snippet_lang {
            None => record.snippet_lang = Some(lang),
            Some(existing) if existing != lang => {
                // One fence tag cannot represent two languages; keep the
                // first and still accumulate the text.
                warn!(
                    series,
                    item,
                    existing,
                    conflicting = lang,
                    "snippet language conflict, keeping first"
                );
            }
            Some(_) => {}
        }
        record.snippet.push_str(comment);
        record.snippet.push(' ');
        record.snippet.push_str(filename);
        record.snippet.push('\n');
        record.snippet.push_str(content);
        if !content.ends_with('\n') {
            record.snippet.push('\n');
        }
        record.snippet.push('\n');
        debug!(series, item, path = %path.display(), "aggregated snippet file");
    }

    /// Consume the state: one document per item, then one table of contents
    /// per series, entries ascending by item number.
    pub fn finalize(
        self,
        target_dir: &Path,
        templates: &dyn TemplateEngine,
    ) -> Result<Vec<OutputDocument>, PipelineError> {
        let mut docs = Vec::new();
        for (series, items) in self.series {
            let mut toc = String::new();
            for (number, record) in &items {
                let title = record
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Item {number}"));
                let mut text = format!("# {title}\n\n{}", record.prose);
                if let Some(lang) = record.snippet_lang {
                    text.push_str(&format!("\n```{lang}\n{}```\n", record.snippet));
                }
                docs.push(OutputDocument {
                    dest: target_dir
                        .join(Category::Series.dest())
                        .join(&series)
                        .join(format!("it{number}.md")),
                    text,
                });
                toc.push_str(&format!("* [{title}](/effectives/{series}/it{number})\n"));
            }

            let book = classify::book_title(&series)
                .map(str::to_string)
                .unwrap_or_else(|| series.clone());
            let mut vars = TemplateVars::new();
            vars.insert("title".to_string(), book);
            vars.insert("content".to_string(), toc);
            let text = templates.render("document", &vars)?;
            docs.push(OutputDocument {
                dest: target_dir.join(TOC_DEST).join(format!("{series}.md")),
                text,
            });
        }
        Ok(docs)
    }
}
