// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule engine.
//!
//! A [`Rule`] pairs a CSS selector with a check. The engine selects the
//! candidates in document order, hands each one to the check together with
//! its tree context, and turns every rejection into one [`Violation`].

use crate::document::Document;
use crate::error::{Error, Result};
use crate::node::NodeExt;
use crate::violation::{Category, Violation};
use scraper::{ElementRef, Selector};
use std::fmt;
use tracing::debug;

/// Check signature: `None` when the element conforms, otherwise the message
pub type Check = fn(&Candidate<'_>) -> Option<String>;

/// A single markup check
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier used in reports and configuration
    pub id: &'static str,
    pub category: Category,
    /// CSS selector choosing the candidate elements
    pub selector: &'static str,
    /// One-line summary for rule listings
    pub description: &'static str,
    pub check: Check,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("selector", &self.selector)
            .finish()
    }
}

impl Rule {
    /// Compile the selector
    pub fn compile(&self) -> Result<Selector> {
        Selector::parse(self.selector).map_err(|e| Error::Selector {
            rule: self.id.to_string(),
            selector: self.selector.to_string(),
            message: format!("{:?}", e),
        })
    }
}

/// An element matched by a rule's selector, with its tree context
pub struct Candidate<'a> {
    pub element: ElementRef<'a>,
    pub document: &'a Document,
    /// Every match of the rule's selector, in document order
    pub matches: &'a [ElementRef<'a>],
    /// Position of `element` within `matches`
    pub index: usize,
}

impl<'a> Candidate<'a> {
    /// Matches that precede this one in document order
    pub fn earlier(&self) -> &'a [ElementRef<'a>] {
        &self.matches[..self.index]
    }

    /// The previous match, if any
    pub fn previous(&self) -> Option<ElementRef<'a>> {
        self.index.checked_sub(1).map(|i| self.matches[i])
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Evaluate one rule against a document
pub fn evaluate(document: &Document, rule: &Rule) -> Result<Vec<Violation>> {
    let selector = rule.compile()?;
    let matches = document.select(&selector);

    let violations: Vec<Violation> = matches
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let candidate = Candidate {
                element: *element,
                document,
                matches: &matches,
                index,
            };
            (rule.check)(&candidate).map(|message| violation_for(rule, element, message))
        })
        .collect();

    debug!(
        rule = rule.id,
        matched = matches.len(),
        violations = violations.len(),
        "evaluated rule"
    );

    Ok(violations)
}

/// Build the violation record for an element
fn violation_for(rule: &Rule, element: &ElementRef<'_>, message: String) -> Violation {
    Violation {
        rule_id: rule.id.to_string(),
        category: rule.category,
        severity: rule.category.severity(),
        tag: element.tag().to_string(),
        identifier: element.identifier(),
        element: element.opening_tag(),
        message,
        file: None,
    }
}
