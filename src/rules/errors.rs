// SPDX-License-Identifier: PMPL-1.0-or-later
//! Structural errors.
//!
//! Markup in this category is broken for assistive technology: images
//! without alternatives, unlabelled controls, dangling references, invalid
//! ARIA and illegal nesting.

use crate::engine::{Candidate, Rule};
use crate::node::{AttrState, NodeExt};
use crate::rules::FOCUSABLE;
use crate::violation::Category;
use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Selector};

/// Non-abstract roles from WAI-ARIA 1.2
const ARIA_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote",
    "button", "caption", "cell", "checkbox", "code", "columnheader", "combobox",
    "complementary", "contentinfo", "definition", "deletion", "dialog",
    "directory", "document", "emphasis", "feed", "figure", "form", "generic",
    "grid", "gridcell", "group", "heading", "img", "insertion", "link", "list",
    "listbox", "listitem", "log", "main", "marquee", "math", "menu", "menubar",
    "menuitem", "menuitemcheckbox", "menuitemradio", "meter", "navigation",
    "none", "note", "option", "paragraph", "presentation", "progressbar",
    "radio", "radiogroup", "region", "row", "rowgroup", "rowheader",
    "scrollbar", "search", "searchbox", "separator", "slider", "spinbutton",
    "status", "strong", "subscript", "superscript", "switch", "tab", "table",
    "tablist", "tabpanel", "term", "textbox", "time", "timer", "toolbar",
    "tooltip", "tree", "treegrid", "treeitem",
];

/// Module prefixes (DPUB-ARIA, Graphics-ARIA)
const ROLE_MODULE_PREFIXES: &[&str] = &["doc-", "graphics-"];

/// States a role cannot work without
const REQUIRED_ARIA: &[(&str, &[&str])] = &[
    ("checkbox", &["aria-checked"]),
    ("combobox", &["aria-expanded"]),
    ("heading", &["aria-level"]),
    ("menuitemcheckbox", &["aria-checked"]),
    ("menuitemradio", &["aria-checked"]),
    ("meter", &["aria-valuenow"]),
    ("radio", &["aria-checked"]),
    ("scrollbar", &["aria-controls", "aria-valuenow"]),
    ("slider", &["aria-valuenow"]),
    ("switch", &["aria-checked"]),
];

pub const RULES: &[Rule] = &[
    Rule {
        id: "img-alt",
        category: Category::Errors,
        selector: "img",
        description: "Images need an alt attribute (empty for decorative images)",
        check: image_alt,
    },
    Rule {
        id: "input-label",
        category: Category::Errors,
        selector: "input:not([type=\"hidden\"]):not([type=\"submit\"]):not([type=\"reset\"]):not([type=\"button\"]):not([type=\"image\"]), select, textarea",
        description: "Form controls need an associated label",
        check: control_label,
    },
    Rule {
        id: "label-for-empty",
        category: Category::Errors,
        selector: "label[for=\"\"]",
        description: "A label's for attribute must not be empty",
        check: empty_label_for,
    },
    Rule {
        id: "label-for-target",
        category: Category::Errors,
        selector: "label[for]:not([for=\"\"])",
        description: "A label's for attribute must reference an existing id",
        check: label_for_target,
    },
    Rule {
        id: "duplicate-id",
        category: Category::Errors,
        selector: "[id]:not([id=\"\"])",
        description: "Element ids must be unique",
        check: duplicate_id,
    },
    Rule {
        id: "duplicate-main",
        category: Category::Errors,
        selector: "main:not([hidden])",
        description: "Only one visible <main> element per document",
        check: duplicate_main,
    },
    Rule {
        id: "presentation-table-semantics",
        category: Category::Errors,
        selector: "table[role=\"presentation\"] th, table[role=\"presentation\"] caption, table[role=\"presentation\"] thead, table[role=\"presentation\"] tfoot, table[role=\"presentation\"] [scope], table[role=\"presentation\"] [headers], table[role=\"none\"] th, table[role=\"none\"] caption, table[role=\"none\"] thead, table[role=\"none\"] tfoot, table[role=\"none\"] [scope], table[role=\"none\"] [headers]",
        description: "Layout tables must not contain data-table semantics",
        check: presentation_table_semantics,
    },
    Rule {
        id: "aria-role-valid",
        category: Category::Errors,
        selector: "[role]",
        description: "Role attributes must name ARIA roles",
        check: valid_role,
    },
    Rule {
        id: "aria-required-attrs",
        category: Category::Errors,
        selector: "[role]",
        description: "Roles must carry their required ARIA states",
        check: required_aria_attributes,
    },
    Rule {
        id: "aria-hidden-focusable",
        category: Category::Errors,
        selector: "[aria-hidden=\"true\"]",
        description: "Focusable elements must not be aria-hidden",
        check: hidden_focusable,
    },
    Rule {
        id: "button-name",
        category: Category::Errors,
        selector: "button",
        description: "Buttons need an accessible name",
        check: button_name,
    },
    Rule {
        id: "nested-interactive",
        category: Category::Errors,
        selector: "a[href], button, input:not([type=\"hidden\"]), select, textarea",
        description: "Interactive elements must not be nested in links or buttons",
        check: nested_interactive,
    },
    Rule {
        id: "list-children",
        category: Category::Errors,
        selector: "ul > :not(li):not(script):not(template), ol > :not(li):not(script):not(template)",
        description: "Lists may only contain <li> elements",
        check: list_children,
    },
    Rule {
        id: "heading-empty",
        category: Category::Errors,
        selector: "h1, h2, h3, h4, h5, h6",
        description: "Headings need text content",
        check: empty_heading,
    },
    Rule {
        id: "iframe-title",
        category: Category::Errors,
        selector: "iframe",
        description: "Frames need a title",
        check: iframe_title,
    },
    Rule {
        id: "html-lang",
        category: Category::Errors,
        selector: "html",
        description: "Documents need a lang attribute",
        check: html_lang,
    },
    Rule {
        id: "document-title",
        category: Category::Errors,
        selector: "head",
        description: "Documents need a non-empty <title>",
        check: document_title,
    },
    Rule {
        id: "tel-href",
        category: Category::Errors,
        selector: "a[href^=\"tel:\" i]",
        description: "tel: links need a complete phone number",
        check: tel_href,
    },
];

fn image_alt(c: &Candidate<'_>) -> Option<String> {
    match c.element.attr_state("alt") {
        AttrState::Absent => Some(
            "image is missing an alt attribute; use alt=\"\" for decorative images".to_string(),
        ),
        AttrState::Blank(_) => Some(
            "alt attribute contains only whitespace; describe the image or use alt=\"\"".to_string(),
        ),
        AttrState::Empty | AttrState::Value(_) => None,
    }
}

fn control_label(c: &Candidate<'_>) -> Option<String> {
    let el = &c.element;
    if el.has_label_attribute() || el.closest("label").is_some() {
        return None;
    }
    if let AttrState::Value(id) = el.attr_state("id") {
        if has_label_for(c, id) {
            return None;
        }
    }

    let kind = match el.attribute("type") {
        Some(t) if el.tag() == "input" => format!("<input type=\"{}\">", t),
        _ => format!("<{}>", el.tag()),
    };
    if el.attr_state("placeholder").is_meaningful() {
        Some(format!(
            "{} relies on its placeholder as a label; placeholders disappear while typing",
            kind
        ))
    } else {
        Some(format!(
            "{} has no associated <label>, aria-label or aria-labelledby",
            kind
        ))
    }
}

fn has_label_for(c: &Candidate<'_>, id: &str) -> bool {
    let selector = Selector::parse("label[for]").expect("valid selector");
    c.document
        .select(&selector)
        .iter()
        .any(|label| label.attribute("for") == Some(id))
}

fn empty_label_for(_c: &Candidate<'_>) -> Option<String> {
    Some("label has an empty for attribute".to_string())
}

fn label_for_target(c: &Candidate<'_>) -> Option<String> {
    let target = c.element.attribute("for")?;
    if c.document.element_by_id(target).is_some() {
        None
    } else {
        Some(format!(
            "label for=\"{}\" does not reference any element; no element has id=\"{}\"",
            target, target
        ))
    }
}

fn duplicate_id(c: &Candidate<'_>) -> Option<String> {
    let id = c.element.attribute("id")?;
    if c.earlier().iter().any(|el| el.attribute("id") == Some(id)) {
        Some(format!("id \"{}\" is already used by an earlier element", id))
    } else {
        None
    }
}

fn duplicate_main(c: &Candidate<'_>) -> Option<String> {
    if c.is_first() {
        None
    } else {
        Some("document has more than one visible <main> element".to_string())
    }
}

fn is_presentational(role: &str) -> bool {
    matches!(role.trim().to_ascii_lowercase().as_str(), "presentation" | "none")
}

fn presentation_table_semantics(c: &Candidate<'_>) -> Option<String> {
    let table = c.element.closest("table")?;
    if !table.attribute("role").is_some_and(is_presentational) {
        return None;
    }
    Some(format!(
        "<{}> adds table semantics inside a table with role=\"{}\"",
        c.element.tag(),
        table.attribute("role").unwrap_or_default().trim()
    ))
}

fn is_known_role(role: &str) -> bool {
    ARIA_ROLES.contains(&role) || ROLE_MODULE_PREFIXES.iter().any(|p| role.starts_with(p))
}

fn valid_role(c: &Candidate<'_>) -> Option<String> {
    let role = match c.element.attr_state("role") {
        AttrState::Value(role) => role.to_ascii_lowercase(),
        AttrState::Empty | AttrState::Blank(_) => {
            return Some("role attribute is empty".to_string());
        }
        AttrState::Absent => return None,
    };

    let unknown: Vec<&str> = role.split_whitespace().filter(|r| !is_known_role(r)).collect();
    if unknown.is_empty() {
        None
    } else {
        Some(format!(
            "role \"{}\" is not a valid ARIA role",
            unknown.join(" ")
        ))
    }
}

/// Native elements expose some states without ARIA
fn has_native_state(element: &ElementRef<'_>, attribute: &str) -> bool {
    match attribute {
        "aria-checked" => element.tag() == "input",
        "aria-level" => matches!(element.tag(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"),
        "aria-valuenow" => matches!(element.tag(), "input" | "meter" | "progress"),
        _ => false,
    }
}

fn required_aria_attributes(c: &Candidate<'_>) -> Option<String> {
    let role = c.element.attribute("role")?.split_whitespace().next()?.to_ascii_lowercase();
    let (_, required) = REQUIRED_ARIA.iter().find(|(r, _)| *r == role)?;

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|attr| !c.element.has_attr(attr) && !has_native_state(&c.element, attr))
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(format!(
            "role \"{}\" is missing required attribute(s): {}",
            role,
            missing.join(", ")
        ))
    }
}

/// Reachable with the Tab key; `tabindex="-1"` takes an element out of the order
fn is_focusable(element: &ElementRef<'_>, focusable: &Selector) -> bool {
    focusable.matches(element)
        && !element
            .attribute("tabindex")
            .is_some_and(|t| t.trim().starts_with('-'))
}

fn hidden_focusable(c: &Candidate<'_>) -> Option<String> {
    let focusable = Selector::parse(FOCUSABLE).expect("valid selector");
    let tag = c.element.tag();

    if is_focusable(&c.element, &focusable) {
        return Some(format!(
            "<{}> is hidden with aria-hidden=\"true\" but can still receive keyboard focus",
            tag
        ));
    }

    let inner = c
        .element
        .descendant_elements()
        .into_iter()
        .find(|el| is_focusable(el, &focusable))?;
    Some(format!(
        "<{}> is hidden with aria-hidden=\"true\" but contains focusable <{}>",
        tag,
        inner.tag()
    ))
}

fn button_name(c: &Candidate<'_>) -> Option<String> {
    let el = &c.element;
    if !el.trimmed_text().is_empty() || el.has_label_attribute() || el.has_labelled_image() {
        return None;
    }
    Some("button has no accessible name: no text, aria-label, aria-labelledby or title".to_string())
}

fn nested_interactive(c: &Candidate<'_>) -> Option<String> {
    let outer = c
        .element
        .closest_where(&|el| el.tag() == "button" || (el.tag() == "a" && el.has_attr("href")))?;
    Some(format!(
        "<{}> is nested inside interactive <{}>",
        c.element.tag(),
        outer.tag()
    ))
}

fn list_children(c: &Candidate<'_>) -> Option<String> {
    let parent = c
        .element
        .parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.tag())
        .unwrap_or("list");
    Some(format!(
        "<{}> is not allowed directly inside <{}>; wrap it in <li>",
        c.element.tag(),
        parent
    ))
}

fn empty_heading(c: &Candidate<'_>) -> Option<String> {
    let el = &c.element;
    if !el.trimmed_text().is_empty() || el.has_label_attribute() || el.has_labelled_image() {
        return None;
    }
    Some(format!("<{}> has no text content", el.tag()))
}

fn iframe_title(c: &Candidate<'_>) -> Option<String> {
    match c.element.attr_state("title") {
        AttrState::Absent => Some("iframe is missing a title attribute".to_string()),
        AttrState::Empty | AttrState::Blank(_) => Some("iframe has an empty title attribute".to_string()),
        AttrState::Value(_) => None,
    }
}

fn html_lang(c: &Candidate<'_>) -> Option<String> {
    if c.document.is_fragment() {
        return None;
    }
    match c.element.attr_state("lang") {
        AttrState::Absent => Some("<html> is missing a lang attribute".to_string()),
        AttrState::Empty | AttrState::Blank(_) => Some("<html> has an empty lang attribute".to_string()),
        AttrState::Value(_) => None,
    }
}

fn document_title(c: &Candidate<'_>) -> Option<String> {
    if c.document.is_fragment() {
        return None;
    }
    let titles = c.element.descendant_elements();
    match titles.iter().find(|el| el.tag() == "title") {
        None => Some("document has no <title>".to_string()),
        Some(title) if title.trimmed_text().is_empty() => Some("document <title> is empty".to_string()),
        Some(_) => None,
    }
}

fn tel_href(c: &Candidate<'_>) -> Option<String> {
    let href = c.element.attribute("href")?;
    // Scheme is matched case-insensitively, so it is always four bytes
    let number = percent_decode_str(href.get(4..).unwrap_or_default()).decode_utf8_lossy();
    let cleaned: String = number
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if digits.len() >= 10 && digits.chars().all(|ch| ch.is_ascii_digit()) {
        None
    } else {
        Some(format!(
            "tel: link has an invalid phone number \"{}\"; expected at least 10 digits",
            cleaned
        ))
    }
}
