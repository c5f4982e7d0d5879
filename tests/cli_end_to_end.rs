#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const FIELD_GUIDE: &str = include_str!("fixtures/field_guide.md");

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("article-render"));
    cmd.env_remove("ARTICLE_RENDER_CONFIG_FILE")
        .env_remove("RUST_LOG")
        .arg("--log-level")
        .arg("warn");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn render_prints_full_document() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "field-guide.md", FIELD_GUIDE);

    cli()
        .arg("render")
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("<!DOCTYPE html>"))
        .stdout(contains("<title>Field Guide to Sourdough</title>"));
}

#[test]
fn render_writes_output_file_with_supplied_recipe() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "guide.md", FIELD_GUIDE);
    let output = dir.path().join("guide.html");

    cli()
        .arg("render")
        .arg(&input)
        .arg("--recipe")
        .arg(fixture("recipe_valid.json"))
        .arg("--format")
        .arg("body-only")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let html = fs::read_to_string(&output).expect("rendered output");
    assert!(html.starts_with("<div class=\"article-content theme-tech-neon"));
    assert!(html.contains("<div class=\"list-steps\">"));
}

#[test]
fn env_overrides_toc_title() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "guide.md", FIELD_GUIDE);

    cli()
        .env("ARTICLE_RENDER__RENDER__TOC_TITLE", "Overview")
        .arg("render")
        .arg(&input)
        .arg("--recipe")
        .arg(fixture("recipe_valid.json"))
        .arg("--format")
        .arg("body-only")
        .assert()
        .success()
        .stdout(contains("<h4>Overview</h4>"));
}

#[test]
fn invalid_recipe_file_still_renders_with_fallback() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "article-1.md", "# Hello\n\nBody text.");

    cli()
        .arg("render")
        .arg(&input)
        .arg("--recipe")
        .arg(fixture("recipe_invalid.json"))
        .arg("--format")
        .arg("body-only")
        .assert()
        .success()
        .stdout(contains("theme-minimal-clean"));
}

#[test]
fn empty_content_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "empty.md", "   \n");

    cli()
        .arg("render")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("article content is empty"));
}

#[test]
fn extract_summary_prints_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "guide.md", FIELD_GUIDE);

    cli()
        .arg("extract")
        .arg(&input)
        .arg("--summary")
        .assert()
        .success()
        .stdout(contains("\"id\": \"table-8\""))
        .stdout(contains("\"rowCount\": 2"));
}

#[test]
fn validate_accepts_good_recipe() {
    cli()
        .arg("validate")
        .arg(fixture("recipe_valid.json"))
        .assert()
        .success()
        .stdout(contains("\"recipeVersion\": \"v1\""));
}

#[test]
fn validate_rejects_bad_recipe() {
    cli()
        .arg("validate")
        .arg(fixture("recipe_invalid.json"))
        .assert()
        .code(1)
        .stdout(contains("\"path\": \"layout[0].component\""));
}

#[test]
fn fallback_is_keyed_by_identity() {
    cli()
        .arg("fallback")
        .arg("article-2")
        .assert()
        .success()
        .stdout(contains("\"theme\": \"tech-neon\""));
}
