// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule catalog.
//!
//! Each category module exposes an ordered `RULES` table. Rules run in table
//! order; new checks are added by appending an entry.

pub mod advice;
pub mod errors;
pub mod obsolete;
pub mod warnings;

use crate::engine::Rule;
use crate::violation::Category;

/// Rules of one category, in evaluation order
pub fn rules_for(category: Category) -> &'static [Rule] {
    match category {
        Category::Errors => errors::RULES,
        Category::Warnings => warnings::RULES,
        Category::Advice => advice::RULES,
        Category::Obsolete => obsolete::RULES,
    }
}

/// Every rule, grouped by category in [`Category::ALL`] order
pub fn all() -> impl Iterator<Item = &'static Rule> {
    Category::ALL.into_iter().flat_map(|c| rules_for(c).iter())
}

/// Look up a rule by id
pub fn find(id: &str) -> Option<&'static Rule> {
    all().find(|rule| rule.id == id)
}

/// Elements that take part in sequential keyboard navigation
pub(crate) const FOCUSABLE: &str = "a[href], area[href], button, input:not([type=\"hidden\"]), select, textarea, iframe, summary, [contenteditable], [tabindex]:not([tabindex^=\"-\"])";
