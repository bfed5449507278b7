// SPDX-License-Identifier: PMPL-1.0-or-later
//! Markupcheck - accessibility and markup assertions for HTML
//!
//! Markupcheck runs a catalog of CSS-selector rules over an HTML string or a
//! parsed [`Document`] and reports every violation at once. It is meant to be
//! called from tests: the `assert_*` helpers panic with one aggregated
//! message, while [`Checker`] returns a [`Report`] for callers that want the
//! violations as data.
//!
//! ## Categories
//!
//! - **Errors**: structural defects (missing alt text, unlabelled inputs,
//!   duplicate ids, invalid ARIA, malformed `tel:` links)
//! - **Warnings**: usability problems (insecure URLs, vague link text,
//!   missing captions)
//! - **Advice**: optional improvements (autocomplete, table captions,
//!   landmarks)
//! - **Obsolete**: elements and attributes removed from HTML
//!
//! ```
//! use markupcheck::{Checker, Category};
//!
//! let report = Checker::default()
//!     .check_category(r#"<img src="logo.png">"#, Category::Errors)
//!     .unwrap();
//! assert_eq!(report.violations[0].rule_id, "img-alt");
//! ```

pub mod assertions;
pub mod checker;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod node;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod violation;

pub use assertions::{
    assert_accessible, assert_no_advice, assert_no_errors, assert_no_obsolete,
    assert_no_warnings, assert_rule, assert_with,
};
pub use checker::Checker;
pub use config::Config;
pub use document::{ensure_document, Document, DocumentSource, ParseOptions};
pub use engine::{evaluate, Candidate, Rule};
pub use error::{Error, Result};
pub use report::{report, Report};
pub use violation::{Category, Identifier, Severity, Violation, ViolationSet};
