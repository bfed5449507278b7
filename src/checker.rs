// SPDX-License-Identifier: PMPL-1.0-or-later
//! Category and single-rule runs over one document.

use crate::config::Config;
use crate::document::{Document, DocumentSource, ParseOptions};
use crate::engine::{evaluate, Rule};
use crate::error::{Error, Result};
use crate::report::Report;
use crate::rules;
use crate::violation::{Category, Violation};
use tracing::debug;

/// Runs catalog rules according to a [`Config`]
#[derive(Debug, Clone, Default)]
pub struct Checker {
    config: Config,
}

impl Checker {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.config.strict_parsing,
        }
    }

    /// Run every enabled rule of `category`, in table order
    pub fn check_category<S: DocumentSource + ?Sized>(
        &self,
        input: &S,
        category: Category,
    ) -> Result<Report> {
        let document = input.to_document(&self.parse_options())?;
        let violations = self.run_rules(&document, rules::rules_for(category).iter())?;
        Ok(Report::for_category(category, violations))
    }

    /// Run every configured category against one parse of the input
    pub fn check_all<S: DocumentSource + ?Sized>(&self, input: &S) -> Result<Report> {
        let document = input.to_document(&self.parse_options())?;
        let selected = self
            .config
            .categories
            .iter()
            .flat_map(|c| rules::rules_for(*c).iter());
        let violations = self.run_rules(&document, selected)?;

        let category = match self.config.categories.as_slice() {
            [only] => Some(*only),
            _ => None,
        };
        Ok(Report { category, violations })
    }

    /// Run one rule by id. Disabled rules still run when asked for by name.
    pub fn check_rule<S: DocumentSource + ?Sized>(&self, input: &S, rule_id: &str) -> Result<Report> {
        let rule = rules::find(rule_id).ok_or_else(|| Error::UnknownRule(rule_id.to_string()))?;
        let document = input.to_document(&self.parse_options())?;
        Ok(Report::new(evaluate(&document, rule)?))
    }

    fn run_rules<'r>(
        &self,
        document: &Document,
        selected: impl Iterator<Item = &'r Rule>,
    ) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();

        for rule in selected.filter(|r| self.config.is_enabled(r.id)) {
            let found = evaluate(document, rule)?;
            let failed = !found.is_empty();
            violations.extend(found);

            if failed && self.config.fail_fast {
                debug!(rule = rule.id, "stopping at first failing rule");
                break;
            }
        }

        Ok(violations)
    }
}
