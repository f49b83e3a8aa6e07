use std::fs::{self, create_dir_all};
use std::path::PathBuf;

use chrono::{Local, TimeZone};
use tempfile::tempdir;

use notesmith::contract::MockHistory;
use notesmith::pipeline;
use notesmith::template::JinjaTemplates;

fn fixed_history() -> MockHistory {
    let date = Local.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    let mut history = MockHistory::new();
    history.expect_get_dates().returning(move |_| (date, date));
    history
}

#[test]
fn essay_with_heading_renders_to_posts_with_inferred_title() {
    let tmp = tempdir().unwrap();
    let essays = tmp.path().join("checkout/essays");
    create_dir_all(&essays).unwrap();
    let src = essays.join("a.md");
    fs::write(&src, "# My Essay\nfirst line\nsecond line\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    let report =
        pipeline::run(&[src], &target, &fixed_history(), &templates).expect("run should succeed");

    let dest = target.join("content/posts/a.md");
    assert_eq!(report.written, vec![dest.clone()]);
    let rendered = fs::read_to_string(dest).unwrap();
    assert!(rendered.contains("title: \"My essay\""));
    assert!(rendered.contains("date: 2020-01-02"));
    assert!(rendered.contains("first line\nsecond line\n"));
    // The heading line was consumed as the title.
    assert!(!rendered.contains("# My Essay"));
}

#[test]
fn essay_without_heading_takes_title_from_filename() {
    let tmp = tempdir().unwrap();
    let essays = tmp.path().join("checkout/essays");
    create_dir_all(&essays).unwrap();
    let src = essays.join("my_cool-trip.md");
    fs::write(&src, "no heading here\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    pipeline::run(&[src], &target, &fixed_history(), &templates).unwrap();

    let rendered = fs::read_to_string(target.join("content/posts/my_cool-trip.md")).unwrap();
    assert!(rendered.contains("title: \"My cool trip\""));
    assert!(rendered.contains("no heading here\n"));
}

#[test]
fn heading_past_the_first_two_lines_is_not_a_title() {
    let tmp = tempdir().unwrap();
    let essays = tmp.path().join("checkout/essays");
    create_dir_all(&essays).unwrap();
    let src = essays.join("late.md");
    fs::write(&src, "intro\nmore intro\n# Late Heading\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    pipeline::run(&[src], &target, &fixed_history(), &templates).unwrap();

    let rendered = fs::read_to_string(target.join("content/posts/late.md")).unwrap();
    assert!(rendered.contains("title: \"Late\""));
    assert!(rendered.contains("# Late Heading"));
}

#[test]
fn readme_collapses_to_folder_page_in_notes() {
    let tmp = tempdir().unwrap();
    let folder = tmp.path().join("checkout/book-notes/hamming");
    create_dir_all(&folder).unwrap();
    let src = folder.join("README.md");
    fs::write(&src, "# The Art of Doing Science\nnotes body\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    pipeline::run(&[src], &target, &fixed_history(), &templates).unwrap();

    let rendered = fs::read_to_string(target.join("content/notes/hamming.md")).unwrap();
    assert!(rendered.contains("title: \"The art of doing science\""));
    assert!(rendered.contains("notes body\n"));
}

#[test]
fn about_page_uses_about_template_in_content_root() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("checkout");
    create_dir_all(&dir).unwrap();
    let src = dir.join("about.md");
    fs::write(&src, "# About Me\nhello\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    pipeline::run(&[src], &target, &fixed_history(), &templates).unwrap();

    let rendered = fs::read_to_string(target.join("content/about.md")).unwrap();
    assert!(rendered.contains("layout: about"));
    assert!(rendered.contains("title: \"About me\""));
}

#[test]
fn unclassified_files_are_skipped_not_fatal() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("checkout/scripts");
    create_dir_all(&dir).unwrap();
    let src = dir.join("deploy.txt");
    fs::write(&src, "nothing to see\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    let report = pipeline::run(
        &[src.clone()],
        &target,
        &fixed_history(),
        &templates,
    )
    .unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.skipped, vec![src]);
}

#[test]
fn rerun_with_unchanged_inputs_is_byte_identical() {
    let tmp = tempdir().unwrap();
    let essays = tmp.path().join("checkout/essays");
    create_dir_all(&essays).unwrap();
    let src = essays.join("a.md");
    fs::write(&src, "# Stable\nbody\n").unwrap();

    let target = tmp.path().join("generated");
    let templates = JinjaTemplates::new().unwrap();
    let sources: Vec<PathBuf> = vec![src];

    pipeline::run(&sources, &target, &fixed_history(), &templates).unwrap();
    let first = fs::read_to_string(target.join("content/posts/a.md")).unwrap();
    pipeline::run(&sources, &target, &fixed_history(), &templates).unwrap();
    let second = fs::read_to_string(target.join("content/posts/a.md")).unwrap();

    assert_eq!(first, second);
}
