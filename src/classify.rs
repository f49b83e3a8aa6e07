//! Path-based category classification.
//!
//! Rules are ordered and first-match-wins: series paths live under
//! `book-notes/` directories, so the series markers must be checked before
//! the generic `book-notes` marker.

use tracing::debug;

/// Substrings that mark a path as belonging to an "Effective" book series.
pub const SERIES_MARKERS: [&str; 3] = ["ecpp", "emcpp", "ejs"];

/// Canonical human-readable book name for a series identifier.
pub fn book_title(series: &str) -> Option<&'static str> {
    match series {
        "ecpp" => Some("Effective C++"),
        "emcpp" => Some("Effective Modern C++"),
        "ejs" => Some("Effective JavaScript"),
        _ => None,
    }
}

/// Content categories. A closed set: dispatch is an exhaustive match, so an
/// unhandled category cannot reach the pipeline at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Essays, one rendered page per source file.
    Post,
    /// Whole-book notes, one rendered page per source file.
    Note,
    /// The about page.
    About,
    /// Multi-file "Effective" book-note series, aggregated per item.
    Series,
}

impl Category {
    /// Output subdirectory under the target root.
    pub fn dest(&self) -> &'static str {
        match self {
            Category::Post => "content/posts",
            Category::Note => "content/notes",
            Category::About => "content",
            Category::Series => "content/effectives",
        }
    }

    /// Template used to render documents of this category.
    pub fn template(&self) -> &'static str {
        match self {
            Category::About => "about",
            Category::Post | Category::Note | Category::Series => "document",
        }
    }
}

/// Classify a source path. `None` means the file is skipped, not that the
/// run failed.
pub fn classify(path: &str) -> Option<Category> {
    if SERIES_MARKERS.iter().any(|marker| path.contains(marker)) {
        return Some(Category::Series);
    }
    if path.contains("book-notes") {
        return Some(Category::Note);
    }
    if path.contains("essay") {
        return Some(Category::Post);
    }
    if path.contains("about") {
        return Some(Category::About);
    }
    debug!(path, "no category matched");
    None
}
