//! Integration tests for the colour table source generator.
//!
//! Tests cover:
//! - Writing declarations and definitions in both modes
//! - Output order and layout
//! - Write failures
//! - Rendering through a caller-supplied handle

#![cfg(all(feature = "chalk", feature = "async"))]

mod common;

use chainwrap::chain::{Deferred, Immediate};
use chainwrap::chalk::{ChalkError, Color, Generator, SourceKind, render};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Writing
// =============================================================================

#[rstest]
#[case(SourceKind::Declarations)]
#[case(SourceKind::Definitions)]
fn generate_writes_the_rendered_source(#[case] kind: SourceKind) {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("chalk.inc");
    let generator = Generator::new(kind, &path);

    let source = generator.generate().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), source);
    assert_eq!(source, generator.render());
}

#[rstest]
#[case(SourceKind::Declarations)]
#[case(SourceKind::Definitions)]
#[tokio::test]
async fn generate_async_writes_the_same_source(#[case] kind: SourceKind) {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("chalk.inc");
    let generator = Generator::new(kind, &path);

    let source = generator.generate_async().await.unwrap();

    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), source);
    assert_eq!(source, generator.render());
}

#[rstest]
fn generate_logs_the_output_path() {
    let captured = common::CapturedLog::default();
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("chalk.inc");
    let generator = Generator::new(SourceKind::Declarations, &path).with_colors([Color::Red]);

    tracing::subscriber::with_default(captured.subscriber(), || generator.generate()).unwrap();

    let output = captured.contents();
    assert!(output.contains("generated source"), "{output}");
    assert!(output.contains("bytes="), "{output}");
}

// =============================================================================
// Layout
// =============================================================================

#[rstest]
fn declarations_follow_table_order() {
    let source = Generator::new(SourceKind::Declarations, "unused").render();
    let lines: Vec<&str> = source.lines().collect();

    assert_eq!(lines.len(), Color::ALL.len());
    assert_eq!(lines[0], "auto reset (const std::string &str) -> std::string;");
    assert_eq!(lines[40], "auto bgWhiteBright (const std::string &str) -> std::string;");
}

#[rstest]
fn definitions_carry_escaped_codes() {
    let source = Generator::new(SourceKind::Definitions, "unused")
        .with_colors([Color::Gray, Color::Dim])
        .render();

    assert_eq!(
        source,
        "\nauto gray (const std::string &str) -> std::string {\n  return filterEmpty(\"\\u001b[90m\", \"\\u001b[39m\", str);\n}\n\
         \nauto dim (const std::string &str) -> std::string {\n  return filterEmpty(\"\\u001b[2m\", \"\\u001b[22m\", str, \"\\u001b[22m\\u001b[2m\");\n}\n"
    );
}

#[rstest]
fn selected_colours_keep_the_given_order() {
    let source = Generator::new(SourceKind::Declarations, "unused")
        .with_colors([Color::Green, Color::Red])
        .render();
    assert_eq!(
        source,
        "auto green (const std::string &str) -> std::string;\nauto red (const std::string &str) -> std::string;"
    );
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
fn generate_into_missing_directory_fails() {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("missing").join("chalk.inc");
    let error = Generator::new(SourceKind::Declarations, &path)
        .generate()
        .unwrap_err();

    assert!(matches!(&error, ChalkError::Write { path: failed, .. } if failed == &path));
    assert!(error.to_string().contains("chalk.inc"));
}

#[rstest]
#[tokio::test]
async fn generate_async_into_missing_directory_fails() {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("missing").join("chalk.inc");
    let error = Generator::new(SourceKind::Definitions, &path)
        .generate_async()
        .await
        .unwrap_err();

    assert!(matches!(&error, ChalkError::Write { path: failed, .. } if failed == &path));
}

// =============================================================================
// Render Pipeline
// =============================================================================

#[rstest]
fn render_through_an_immediate_handle() {
    let source = render(Immediate::new(vec![Color::Bold]), SourceKind::Declarations).raw_value();
    assert_eq!(source, "auto bold (const std::string &str) -> std::string;");
}

#[rstest]
#[tokio::test]
async fn render_through_a_deferred_handle() {
    let colors = Deferred::from_future(async { vec![Color::Red, Color::Blue] });
    let source = render(colors, SourceKind::Declarations).await.unwrap();
    assert_eq!(source.lines().count(), 2);
    assert!(source.starts_with("auto red "));
}
