// SPDX-License-Identifier: PMPL-1.0-or-later
//! Read-only tree context for rule checks.
//!
//! Selectors narrow the candidates; these helpers answer the questions a
//! selector cannot: closest ancestor, trimmed text, how an attribute is set.

use crate::violation::Identifier;
use scraper::ElementRef;

/// How an attribute is present on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrState<'a> {
    /// Attribute not present at all
    Absent,
    /// Present with an empty value (`alt=""`)
    Empty,
    /// Present with only whitespace (`alt=" "`)
    Blank(&'a str),
    /// Present with meaningful content
    Value(&'a str),
}

impl<'a> AttrState<'a> {
    /// Present with non-whitespace content
    pub fn is_meaningful(&self) -> bool {
        matches!(self, AttrState::Value(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AttrState::Absent)
    }
}

/// Element helpers used by rule checks
pub trait NodeExt<'a> {
    /// Lower-case tag name
    fn tag(&self) -> &'a str;

    /// Attribute value, looked up case-insensitively
    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// Whether the attribute is present, whatever its value
    fn has_attr(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Distinguish absent, empty, whitespace-only and meaningful values
    fn attr_state(&self, name: &str) -> AttrState<'a> {
        match self.attribute(name) {
            None => AttrState::Absent,
            Some("") => AttrState::Empty,
            Some(v) if v.trim().is_empty() => AttrState::Blank(v),
            Some(v) => AttrState::Value(v),
        }
    }

    /// Concatenated descendant text
    fn text_content(&self) -> String;

    /// Descendant text with surrounding whitespace removed
    fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }

    /// Nearest ancestor (excluding the element itself) with the given tag
    fn closest(&self, tag: &str) -> Option<ElementRef<'a>>;

    /// Nearest ancestor (excluding the element itself) accepted by `pred`
    fn closest_where(&self, pred: &dyn Fn(&ElementRef<'a>) -> bool) -> Option<ElementRef<'a>>;

    /// Child elements in document order
    fn child_elements_vec(&self) -> Vec<ElementRef<'a>>;

    /// Descendant elements (excluding the element itself) in document order
    fn descendant_elements(&self) -> Vec<ElementRef<'a>>;

    /// Best available identifier: `id`, else `name`, else nothing
    fn identifier(&self) -> Identifier {
        match (self.attribute("id"), self.attribute("name")) {
            (Some(id), _) if !id.is_empty() => Identifier::Id(id.to_string()),
            (_, Some(name)) if !name.is_empty() => Identifier::Name(name.to_string()),
            _ => Identifier::None,
        }
    }

    /// Opening tag with its attributes, e.g. `<img src="a.png" alt="">`
    fn opening_tag(&self) -> String;

    /// Whether the element has a name an assistive technology can announce
    /// through `aria-label`, `aria-labelledby` or `title`
    fn has_label_attribute(&self) -> bool {
        self.attr_state("aria-label").is_meaningful()
            || self.attr_state("aria-labelledby").is_meaningful()
            || self.attr_state("title").is_meaningful()
    }

    /// Whether a descendant image carries meaningful alt text
    fn has_labelled_image(&self) -> bool {
        self.descendant_elements()
            .iter()
            .any(|el| matches!(el.tag(), "img" | "area") && el.attr_state("alt").is_meaningful())
    }
}

impl<'a> NodeExt<'a> for ElementRef<'a> {
    fn tag(&self) -> &'a str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        // The tokenizer lower-cases attribute names on HTML elements
        self.value().attr(&name.to_ascii_lowercase())
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn closest(&self, tag: &str) -> Option<ElementRef<'a>> {
        self.closest_where(&|el| el.value().name().eq_ignore_ascii_case(tag))
    }

    fn closest_where(&self, pred: &dyn Fn(&ElementRef<'a>) -> bool) -> Option<ElementRef<'a>> {
        self.ancestors().filter_map(ElementRef::wrap).find(|el| pred(el))
    }

    fn child_elements_vec(&self) -> Vec<ElementRef<'a>> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn descendant_elements(&self) -> Vec<ElementRef<'a>> {
        let own_id = self.id();
        self.descendants()
            .filter(|node| node.id() != own_id)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn opening_tag(&self) -> String {
        let attrs: String = self
            .value()
            .attrs()
            .map(|(k, v)| format!(" {}=\"{}\"", k, v))
            .collect();
        format!("<{}{}>", self.tag(), attrs)
    }
}
