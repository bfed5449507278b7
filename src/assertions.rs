// SPDX-License-Identifier: PMPL-1.0-or-later
//! Test assertions.
//!
//! Each helper parses the input (unless it is already a [`Document`]), runs
//! the requested rules and panics with one aggregated message listing every
//! violation. A clean document passes silently.
//!
//! ```rust,ignore
//! #[test]
//! fn homepage_is_accessible() {
//!     let html = render_homepage();
//!     markupcheck::assert_no_errors(&html);
//!     markupcheck::assert_rule(&html, "tel-href");
//! }
//! ```
//!
//! [`Document`]: crate::document::Document

use crate::checker::Checker;
use crate::document::DocumentSource;
use crate::error::Result;
use crate::report::Report;
use crate::violation::Category;

#[track_caller]
fn assert_clean(outcome: Result<Report>) {
    match outcome.and_then(Report::into_result) {
        Ok(()) => {}
        Err(e) => panic!("{}", e),
    }
}

/// Fail on any structural error
#[track_caller]
pub fn assert_no_errors<S: DocumentSource + ?Sized>(input: &S) {
    assert_clean(Checker::default().check_category(input, Category::Errors));
}

/// Fail on any usability warning
#[track_caller]
pub fn assert_no_warnings<S: DocumentSource + ?Sized>(input: &S) {
    assert_clean(Checker::default().check_category(input, Category::Warnings));
}

/// Fail on any advice item
#[track_caller]
pub fn assert_no_advice<S: DocumentSource + ?Sized>(input: &S) {
    assert_clean(Checker::default().check_category(input, Category::Advice));
}

/// Fail on any obsolete element or attribute
#[track_caller]
pub fn assert_no_obsolete<S: DocumentSource + ?Sized>(input: &S) {
    assert_clean(Checker::default().check_category(input, Category::Obsolete));
}

/// Fail on a violation from any category
#[track_caller]
pub fn assert_accessible<S: DocumentSource + ?Sized>(input: &S) {
    assert_clean(Checker::default().check_all(input));
}

/// Fail on violations of a single rule
#[track_caller]
pub fn assert_rule<S: DocumentSource + ?Sized>(input: &S, rule_id: &str) {
    assert_clean(Checker::default().check_rule(input, rule_id));
}

/// Fail on violations found by a configured checker
#[track_caller]
pub fn assert_with<S: DocumentSource + ?Sized>(checker: &Checker, input: &S) {
    assert_clean(checker.check_all(input));
}
