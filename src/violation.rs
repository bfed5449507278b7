// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violation types shared by the engine, the reporter and the scanner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Rule grouping, invoked together by the category entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Structural errors: markup that is broken for assistive technology
    Errors,
    /// Usability problems that should be addressed
    Warnings,
    /// Optional improvements
    Advice,
    /// Elements and attributes removed from HTML
    Obsolete,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Errors,
        Category::Warnings,
        Category::Advice,
        Category::Obsolete,
    ];

    /// Severity of every violation in this category
    pub fn severity(&self) -> Severity {
        match self {
            Category::Errors => Severity::Error,
            Category::Warnings | Category::Obsolete => Severity::Warning,
            Category::Advice => Severity::Suggestion,
        }
    }

    /// Noun used in failure headers ("3 accessibility errors found")
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Errors => "error",
            Category::Warnings => "warning",
            Category::Advice => "advice item",
            Category::Obsolete => "obsolete feature",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Errors => write!(f, "errors"),
            Category::Warnings => write!(f, "warnings"),
            Category::Advice => write!(f, "advice"),
            Category::Obsolete => write!(f, "obsolete"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "errors" | "error" => Ok(Category::Errors),
            "warnings" | "warning" => Ok(Category::Warnings),
            "advice" => Ok(Category::Advice),
            "obsolete" | "obsoletes" => Ok(Category::Obsolete),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Severity levels for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Broken markup - fails CI
    Error,
    /// Should be addressed
    Warning,
    /// Suggestion for improvement
    Suggestion,
}

impl Severity {
    /// Whether this severity fails a CLI run
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Suggestion => write!(f, "SUGGESTION"),
        }
    }
}

/// The attribute that best identifies an offending element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Identifier {
    Id(String),
    Name(String),
    None,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, " id=\"{}\"", id),
            Identifier::Name(name) => write!(f, " name=\"{}\"", name),
            Identifier::None => Ok(()),
        }
    }
}

/// One element failing one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule identifier (e.g. "img-alt")
    pub rule_id: String,
    pub category: Category,
    pub severity: Severity,
    /// Tag name of the offending element
    pub tag: String,
    pub identifier: Identifier,
    /// Opening tag of the offending element
    pub element: String,
    /// Human-readable description of the defect
    pub message: String,
    /// File the element was found in, when scanning from disk
    pub file: Option<PathBuf>,
}

impl Violation {
    /// Minimal identifying fragment, e.g. `<input id="email">`
    pub fn fragment(&self) -> String {
        format!("<{}{}>", self.tag, self.identifier)
    }

    /// Set file location
    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match &self.file {
            Some(f) => format!("{} {}", f.display(), self.fragment()),
            None => self.fragment(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule_id, self.fragment(), self.message)
    }
}

/// A collection of violations with aggregation methods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSet {
    /// All violations, in evaluation order
    pub violations: Vec<Violation>,
}

impl ViolationSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Extend with violations from an iterator
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Get violations by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.severity == severity).collect()
    }

    /// Get violations by category
    pub fn by_category(&self, category: Category) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.category == category).collect()
    }

    /// Get violations for one rule
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule_id == rule_id).collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Violation> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Violation> {
        self.by_severity(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity.is_blocking())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
