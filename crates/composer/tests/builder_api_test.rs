//! Integration tests for the DocumentBuilder API
//!
//! These tests verify that the public API works and is usable.

use chrono::NaiveDate;
use composer::{
    Clock, DocumentBuilder, MacroContext,
    config::{AppConfig, ExportConfig, ParserConfig},
    element::ElementType,
    export::ExportFormat,
};

fn fixed_context() -> MacroContext {
    let now = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 7, 9)
        .unwrap();
    MacroContext::fixed(now, 1_709_647_629_000)
}

#[test]
fn test_parse_simple_document() {
    let builder = DocumentBuilder::default();
    let root = builder.parse("#1 Title\nbody text");

    assert_eq!(root.kind(), ElementType::Root);
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].kind(), ElementType::H1);
    assert_eq!(root.children()[1].kind(), ElementType::Paragraph);
}

#[test]
fn test_parse_empty_document() {
    let root = DocumentBuilder::default().parse("");
    assert!(root.children().is_empty());
}

#[test]
fn test_render_tree() {
    let builder = DocumentBuilder::default();
    let root = builder.parse("plain text");
    let output = builder.render(&root).expect("Failed to render");

    assert_eq!(output, "ROOT\n|    PARAGRAPH\n|    |    TEXT \"plain text\"\n");
}

#[test]
fn test_render_outline() {
    let config = AppConfig::default().with_format(ExportFormat::Outline);
    let builder = DocumentBuilder::new(config);
    let root = builder.parse("#1 Intro\nsome text\n=line=\n#2 Code\n{\n.rs\nfn main() {}\n}");
    let output = builder.render(&root).expect("Failed to render");

    assert_eq!(
        output,
        "H1 Intro\n|    DIVIDER Line\n|    H2 Code\n|    |    CODE rs\n"
    );
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(
        ParserConfig::new(Clock::Utc),
        ExportConfig::new(ExportFormat::Tree, "  "),
    );
    let builder = DocumentBuilder::new(config);
    assert_eq!(builder.config().parser().clock(), Clock::Utc);

    let root = builder.parse("&bold&");
    let output = builder.render(&root).expect("Failed to render");
    assert_eq!(
        output,
        "ROOT\n  PARAGRAPH\n    BOLD\n      TEXT \"bold\"\n"
    );
}

#[test]
fn test_parse_with_fixed_context() {
    let builder = DocumentBuilder::default();
    let root = builder.parse_with("{$date}", &fixed_context());

    assert_eq!(root.children()[0].kind(), ElementType::Code);
    assert_eq!(root.children()[0].literal(), "05/03/2024");
}
