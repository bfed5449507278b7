// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for markupcheck

use markupcheck::config::Config;
use markupcheck::report::{generate_report, OutputFormat};
use markupcheck::{
    assert_accessible, assert_no_errors, assert_rule, ensure_document, scanner, Category, Checker,
    Document, Error, Identifier,
};
use std::path::Path;
use tempfile::TempDir;

fn rule_ids(report: &markupcheck::Report) -> Vec<&str> {
    report.violations.iter().map(|v| v.rule_id.as_str()).collect()
}

#[test]
fn test_img_alt_states() {
    let checker = Checker::default();

    let missing = checker.check_rule(r#"<img src="a.png">"#, "img-alt").expect("check");
    assert_eq!(missing.len(), 1);

    let blank = checker.check_rule(r#"<img src="a.png" alt=" ">"#, "img-alt").expect("check");
    assert_eq!(blank.len(), 1);
    assert_ne!(missing.violations[0].message, blank.violations[0].message);

    assert!(checker.check_rule(r#"<img src="a.png" alt="">"#, "img-alt").expect("check").is_empty());
    assert!(checker.check_rule(r#"<img src="a.png" alt="Logo">"#, "img-alt").expect("check").is_empty());
}

#[test]
fn test_label_for_rules() {
    let report = Checker::default()
        .check_category(r#"<label for="">Name</label><label for="x">Email</label>"#, Category::Errors)
        .expect("check");
    assert_eq!(rule_ids(&report), vec!["label-for-empty", "label-for-target"]);
    assert!(report.violations[1].message.contains("\"x\""));
}

#[test]
fn test_tel_links() {
    assert_rule(r#"<a href="tel:+14155551234">Call</a>"#, "tel-href");

    let err = Checker::default()
        .check_rule(r#"<a href="tel:123">Call</a>"#, "tel-href")
        .and_then(markupcheck::Report::into_result)
        .unwrap_err();
    assert!(err.to_string().contains("123"));
}

#[test]
fn test_duplicate_main_reports_second() {
    let report = Checker::default()
        .check_rule(r#"<main id="one"></main><main id="two"></main>"#, "duplicate-main")
        .expect("check");
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations[0].identifier, Identifier::Id("two".to_string()));
}

#[test]
fn test_presentation_table() {
    let report = Checker::default()
        .check_rule(r#"<table role="presentation"><th>A</th></table>"#, "presentation-table-semantics")
        .expect("check");
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations[0].tag, "th");
}

#[test]
fn test_same_rule_twice_on_shared_document() {
    let document = Document::parse(r#"<img src="a.png"><img src="b.png" id="b">"#);
    let checker = Checker::default();
    let first = checker.check_rule(&document, "img-alt").expect("check");
    let second = checker.check_rule(&document, "img-alt").expect("check");
    assert_eq!(first.violations, second.violations);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_ensure_document_borrows_parsed_input() {
    let document = Document::parse("<p>Hello</p>");
    let ensured = ensure_document(&document).expect("ensure");
    assert!(std::ptr::eq(ensured.as_ref(), &document));
}

#[test]
fn test_aggregated_failure_message() {
    let err = Checker::default()
        .check_category(r#"<img src="a.png"><input id="q" type="text">"#, Category::Errors)
        .and_then(markupcheck::Report::into_result)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("2 accessibility error(s) found:"));
    assert!(message.contains("[img-alt] <img>:"));
    assert!(message.contains("[input-label] <input id=\"q\">:"));
}

#[test]
fn test_accessible_fixture_passes_every_category() {
    let html = std::fs::read_to_string("tests/fixtures/accessible.html").expect("fixture");
    assert_accessible(&html);
}

#[test]
#[should_panic(expected = "accessibility error(s) found:")]
fn test_inaccessible_fixture_fails_errors() {
    let html = std::fs::read_to_string("tests/fixtures/inaccessible.html").expect("fixture");
    assert_no_errors(&html);
}

#[test]
fn test_inaccessible_fixture_rules() {
    let html = std::fs::read_to_string("tests/fixtures/inaccessible.html").expect("fixture");
    let report = Checker::default().check_category(&html, Category::Errors).expect("check");
    let ids = rule_ids(&report);

    for expected in [
        "img-alt",
        "input-label",
        "label-for-empty",
        "label-for-target",
        "duplicate-id",
        "duplicate-main",
        "presentation-table-semantics",
        "aria-role-valid",
        "button-name",
        "heading-empty",
        "iframe-title",
        "html-lang",
        "document-title",
        "tel-href",
    ] {
        assert!(ids.contains(&expected), "expected {} in {:?}", expected, ids);
    }
}

#[test]
fn test_fragment_skips_document_rules() {
    let html = std::fs::read_to_string("tests/fixtures/fragment.html").expect("fixture");
    assert_no_errors(&html);

    let report = Checker::default().check_all(&html).expect("check");
    assert_eq!(rule_ids(&report), vec!["obsolete-anchor-name"]);
}

#[test]
fn test_scan_fixtures_directory() {
    let violations = scanner::scan_directory(Path::new("tests/fixtures"), &Checker::default())
        .expect("scan should succeed");

    assert!(violations.has_errors());
    assert!(violations
        .violations
        .iter()
        .filter(|v| v.severity.is_blocking())
        .all(|v| v.file.as_ref().is_some_and(|f| f.ends_with("inaccessible.html"))));
}

#[test]
fn test_scan_respects_category_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("old.html"), "<center>Hi</center><img src=\"a.png\">").unwrap();

    let checker = Checker::new(Config {
        categories: vec![Category::Obsolete],
        ..Config::default()
    });
    let violations = scanner::scan_directory(dir.path(), &checker).expect("scan");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.violations[0].rule_id, "obsolete-element");
    assert!(!violations.has_errors());
}

#[test]
fn test_strict_scan_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.html");
    std::fs::write(&path, "<div><p>unclosed</span></div>").unwrap();

    let checker = Checker::new(Config {
        strict_parsing: true,
        ..Config::default()
    });
    assert!(matches!(scanner::scan_file(&path, &checker), Err(Error::Parse(_))));
    assert!(scanner::scan_file(&path, &Checker::default()).is_ok());
}

#[test]
fn test_report_formats() {
    let violations = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &Checker::default())
        .expect("scan should succeed");

    let text = generate_report(&violations, OutputFormat::Text);
    assert!(text.contains("=== Markupcheck Report ==="));
    assert!(text.contains("RESULT: FAILED"));

    let json = generate_report(&violations, OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["violations"].as_array().map(Vec::len), Some(violations.len()));

    let sarif = generate_report(&violations, OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("valid SARIF JSON");
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "markupcheck");
}
