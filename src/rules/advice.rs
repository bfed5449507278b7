// SPDX-License-Identifier: PMPL-1.0-or-later
//! Optional advice: improvements that are not failures on their own.

use crate::engine::{Candidate, Rule};
use crate::node::{AttrState, NodeExt};
use crate::violation::Category;
use scraper::Selector;

/// Longest alt text before it should move into a caption
const MAX_ALT_LENGTH: usize = 150;

/// Fragment targets conventionally used by skip links
const SKIP_TARGETS: &[&str] = &["#main", "#content", "#main-content"];

pub const RULES: &[Rule] = &[
    Rule {
        id: "input-autocomplete",
        category: Category::Advice,
        selector: "input[type=\"email\"]:not([autocomplete]), input[type=\"tel\"]:not([autocomplete]), input[type=\"url\"]:not([autocomplete])",
        description: "Personal-data inputs should declare autocomplete",
        check: input_autocomplete,
    },
    Rule {
        id: "th-scope",
        category: Category::Advice,
        selector: "th:not([scope])",
        description: "Table headers should declare their scope",
        check: th_scope,
    },
    Rule {
        id: "table-caption",
        category: Category::Advice,
        selector: "table:not([role=\"presentation\"]):not([role=\"none\"])",
        description: "Data tables should have a caption",
        check: table_caption,
    },
    Rule {
        id: "first-heading",
        category: Category::Advice,
        selector: "h1, h2, h3, h4, h5, h6",
        description: "Pages should start with an <h1>",
        check: first_heading,
    },
    Rule {
        id: "abbr-title",
        category: Category::Advice,
        selector: "abbr:not([title])",
        description: "Abbreviations should carry their expansion",
        check: abbr_title,
    },
    Rule {
        id: "alt-length",
        category: Category::Advice,
        selector: "img[alt]",
        description: "Alt text should be concise",
        check: alt_length,
    },
    Rule {
        id: "empty-paragraph",
        category: Category::Advice,
        selector: "p:empty",
        description: "Use CSS for spacing, not empty paragraphs",
        check: empty_paragraph,
    },
    Rule {
        id: "single-item-list",
        category: Category::Advice,
        selector: "ul > li:first-child:last-child, ol > li:first-child:last-child",
        description: "Single-item lists rarely need list markup",
        check: single_item_list,
    },
    Rule {
        id: "landmarks",
        category: Category::Advice,
        selector: "body",
        description: "Pages should use landmark elements",
        check: landmarks,
    },
    Rule {
        id: "skip-link",
        category: Category::Advice,
        selector: "body",
        description: "Pages with navigation should offer a skip link",
        check: skip_link,
    },
];

fn input_autocomplete(c: &Candidate<'_>) -> Option<String> {
    let kind = c.element.attribute("type")?.to_ascii_lowercase();
    Some(format!(
        "<input type=\"{}\"> has no autocomplete attribute; add autocomplete=\"{}\"",
        kind, kind
    ))
}

fn th_scope(c: &Candidate<'_>) -> Option<String> {
    let text = c.element.trimmed_text();
    let display: String = if text.chars().count() > 30 {
        format!("{}...", text.chars().take(30).collect::<String>())
    } else {
        text
    };
    Some(format!(
        "<th> \"{}\" has no scope attribute; add scope=\"col\" or scope=\"row\"",
        display
    ))
}

fn table_caption(c: &Candidate<'_>) -> Option<String> {
    let th = Selector::parse("th").expect("valid selector");
    let is_data_table = c.element.select(&th).next().is_some();
    let has_caption = c.element.child_elements_vec().iter().any(|el| el.tag() == "caption");
    if !is_data_table || has_caption || c.element.has_label_attribute() {
        return None;
    }
    Some("data table has no <caption> describing its contents".to_string())
}

fn first_heading(c: &Candidate<'_>) -> Option<String> {
    if !c.is_first() || c.document.is_fragment() || c.element.tag() == "h1" {
        return None;
    }
    Some(format!(
        "first heading is <{}>; start the page with <h1>",
        c.element.tag()
    ))
}

fn abbr_title(c: &Candidate<'_>) -> Option<String> {
    Some(format!(
        "abbreviation \"{}\" has no title giving its expansion",
        c.element.trimmed_text()
    ))
}

fn alt_length(c: &Candidate<'_>) -> Option<String> {
    let AttrState::Value(alt) = c.element.attr_state("alt") else {
        return None;
    };
    let length = alt.trim().chars().count();
    if length > MAX_ALT_LENGTH {
        Some(format!(
            "alt text is {} characters long; keep it under {} and move detail into a caption",
            length, MAX_ALT_LENGTH
        ))
    } else {
        None
    }
}

fn empty_paragraph(_c: &Candidate<'_>) -> Option<String> {
    Some("empty <p> used for spacing; use CSS margins instead".to_string())
}

fn single_item_list(c: &Candidate<'_>) -> Option<String> {
    let list = c
        .element
        .parent()
        .and_then(scraper::ElementRef::wrap)
        .map(|p| p.tag())
        .unwrap_or("ul");
    Some(format!("<{}> contains a single item", list))
}

fn landmarks(c: &Candidate<'_>) -> Option<String> {
    if c.document.is_fragment() {
        return None;
    }
    let landmark = Selector::parse("header, nav, main, footer, [role=\"main\"], [role=\"navigation\"], [role=\"banner\"], [role=\"contentinfo\"]")
        .expect("valid selector");
    if c.element.select(&landmark).next().is_some() {
        None
    } else {
        Some("page has no landmark elements (header, nav, main, footer)".to_string())
    }
}

fn skip_link(c: &Candidate<'_>) -> Option<String> {
    if c.document.is_fragment() {
        return None;
    }
    let nav = Selector::parse("nav").expect("valid selector");
    if c.element.select(&nav).next().is_none() {
        return None;
    }

    let links = Selector::parse("a[href^=\"#\"]").expect("valid selector");
    let has_skip_link = c.element.select(&links).any(|link| {
        let href = link.attribute("href").unwrap_or_default();
        SKIP_TARGETS.contains(&href) || link.text_content().to_lowercase().contains("skip")
    });

    if has_skip_link {
        None
    } else {
        Some("page has navigation but no skip link to the main content".to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use crate::engine::evaluate;
    use crate::rules::find;
    use crate::violation::{Severity, Violation};

    fn run(rule_id: &str, html: &str) -> Vec<Violation> {
        let rule = find(rule_id).expect("rule exists");
        evaluate(&Document::parse(html), rule).expect("evaluate")
    }

    #[test]
    fn test_input_autocomplete() {
        let html = r#"<input type="email" id="e"><input type="email" autocomplete="email"><input type="text">"#;
        let violations = run("input-autocomplete", html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Suggestion);
        assert!(violations[0].message.contains("autocomplete=\"email\""));
    }

    #[test]
    fn test_th_scope() {
        let html = r#"<table><tr><th>Name</th><th scope="col">Value</th></tr></table>"#;
        let violations = run("th-scope", html);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("\"Name\""));
    }

    #[test]
    fn test_table_caption() {
        let html = r#"<table><tr><th>A</th></tr></table><table><caption>Prices</caption><tr><th>B</th></tr></table><table><tr><td>layout</td></tr></table>"#;
        assert_eq!(run("table-caption", html).len(), 1);
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(run("first-heading", "<!DOCTYPE html><html><body><h2>A</h2><h1>B</h1></body></html>").len(), 1);
        assert!(run("first-heading", "<!DOCTYPE html><html><body><h1>A</h1><h2>B</h2></body></html>").is_empty());
        assert!(run("first-heading", "<h2>Fragment</h2>").is_empty());
    }

    #[test]
    fn test_abbr_title() {
        let violations = run("abbr-title", r#"<abbr>WCAG</abbr><abbr title="HyperText Markup Language">HTML</abbr>"#);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("WCAG"));
    }

    #[test]
    fn test_alt_length() {
        let long = "a".repeat(151);
        let html = format!(r#"<img src="a.png" alt="{}"><img src="b.png" alt="Short">"#, long);
        assert_eq!(run("alt-length", &html).len(), 1);
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(run("empty-paragraph", "<p></p><p>Text</p><p> </p>").len(), 1);
    }

    #[test]
    fn test_single_item_list() {
        let violations = run("single-item-list", "<ul><li>Only</li></ul><ol><li>One</li><li>Two</li></ol>");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "<ul> contains a single item");
    }

    #[test]
    fn test_landmarks() {
        assert_eq!(run("landmarks", "<!DOCTYPE html><html><body><div>Content</div></body></html>").len(), 1);
        assert!(run("landmarks", "<!DOCTYPE html><html><body><main>Content</main></body></html>").is_empty());
    }

    #[test]
    fn test_skip_link() {
        let without = "<!DOCTYPE html><html><body><nav><a href=\"/\">Home</a></nav><main id=\"main\"></main></body></html>";
        let with = "<!DOCTYPE html><html><body><a href=\"#main\">Skip to content</a><nav><a href=\"/\">Home</a></nav><main id=\"main\"></main></body></html>";
        assert_eq!(run("skip-link", without).len(), 1);
        assert!(run("skip-link", with).is_empty());
    }
}
