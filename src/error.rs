// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for markupcheck

use crate::report::Report;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for markupcheck
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("Invalid selector `{selector}` in rule {rule}: {message}")]
    Selector {
        rule: String,
        selector: String,
        message: String,
    },

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("{0}")]
    ViolationFound(Report),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// The report carried by an assertion failure, if this is one
    pub fn report(&self) -> Option<&Report> {
        match self {
            Error::ViolationFound(report) => Some(report),
            _ => None,
        }
    }
}
