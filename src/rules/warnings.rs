// SPDX-License-Identifier: PMPL-1.0-or-later
//! Usability warnings.
//!
//! Markup that works but degrades the experience for keyboard, screen reader
//! or security-conscious users.

use crate::engine::{Candidate, Rule};
use crate::node::{AttrState, NodeExt};
use crate::violation::Category;
use scraper::{ElementRef, Selector};

/// Attributes that carry URLs
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "data", "poster"];

/// Elements whose explicit role repeats the implicit one
const REDUNDANT_ROLES: &[(&str, &str)] = &[
    ("nav", "navigation"),
    ("main", "main"),
    ("aside", "complementary"),
    ("form", "form"),
    ("button", "button"),
    ("a", "link"),
    ("textarea", "textbox"),
    ("table", "table"),
    ("ul", "list"),
    ("ol", "list"),
    ("li", "listitem"),
    ("article", "article"),
    ("img", "img"),
    ("dialog", "dialog"),
];

/// Link text that says nothing about the destination
const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "click",
    "read more",
    "more",
    "learn more",
    "link",
    "this link",
];

/// Generic alt text values that indicate lazy/unhelpful descriptions
const GENERIC_ALT_VALUES: &[&str] = &[
    "image", "photo", "picture", "icon", "graphic", "img", "banner", "logo",
    "untitled", "screenshot", "thumbnail", "placeholder",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".avif"];

pub const RULES: &[Rule] = &[
    Rule {
        id: "insecure-url",
        category: Category::Warnings,
        selector: "[href^=\"http:\"], [src^=\"http:\"], [action^=\"http:\"], [formaction^=\"http:\"], [data^=\"http:\"], [poster^=\"http:\"]",
        description: "Resources and links should use https",
        check: insecure_url,
    },
    Rule {
        id: "javascript-url",
        category: Category::Warnings,
        selector: "a[href^=\"javascript:\"]",
        description: "Links should not run script through javascript: URLs",
        check: javascript_url,
    },
    Rule {
        id: "target-blank-noopener",
        category: Category::Warnings,
        selector: "a[target=\"_blank\"]:not([rel~=\"noopener\"]):not([rel~=\"noreferrer\"])",
        description: "Links opening new windows should set rel=\"noopener\"",
        check: target_blank,
    },
    Rule {
        id: "positive-tabindex",
        category: Category::Warnings,
        selector: "[tabindex]",
        description: "tabindex should be 0 or -1",
        check: positive_tabindex,
    },
    Rule {
        id: "heading-order",
        category: Category::Warnings,
        selector: "h1, h2, h3, h4, h5, h6",
        description: "Heading levels should not be skipped",
        check: heading_order,
    },
    Rule {
        id: "redundant-role",
        category: Category::Warnings,
        selector: "[role]",
        description: "Explicit roles should not repeat the implicit role",
        check: redundant_role,
    },
    Rule {
        id: "div-button",
        category: Category::Warnings,
        selector: "div[role=\"button\"], span[role=\"button\"]",
        description: "Use <button> instead of role=\"button\" on generic elements",
        check: div_button,
    },
    Rule {
        id: "onclick-no-keyboard",
        category: Category::Warnings,
        selector: "div[onclick], span[onclick], p[onclick], li[onclick], td[onclick], img[onclick]",
        description: "Click handlers on non-interactive elements need keyboard support",
        check: onclick_no_keyboard,
    },
    Rule {
        id: "link-name",
        category: Category::Warnings,
        selector: "a[href]",
        description: "Links need an accessible name",
        check: link_name,
    },
    Rule {
        id: "generic-link-text",
        category: Category::Warnings,
        selector: "a[href]",
        description: "Link text should describe the destination",
        check: generic_link_text,
    },
    Rule {
        id: "generic-alt",
        category: Category::Warnings,
        selector: "img[alt]:not([alt=\"\"])",
        description: "Alt text should describe the image, not name it",
        check: generic_alt,
    },
    Rule {
        id: "video-captions",
        category: Category::Warnings,
        selector: "video",
        description: "Videos need a captions or subtitles track",
        check: video_captions,
    },
    Rule {
        id: "autoplay-media",
        category: Category::Warnings,
        selector: "audio[autoplay]:not([muted]), video[autoplay]:not([muted])",
        description: "Media should not autoplay with sound",
        check: autoplay_media,
    },
];

fn insecure_url(c: &Candidate<'_>) -> Option<String> {
    let offending: Vec<String> = URL_ATTRIBUTES
        .iter()
        .filter_map(|attr| {
            c.element
                .attribute(attr)
                .filter(|v| v.starts_with("http:"))
                .map(|v| format!("{}=\"{}\"", attr, v))
        })
        .collect();

    if offending.is_empty() {
        None
    } else {
        Some(format!(
            "{} uses an insecure http: URL; use https:",
            offending.join(", ")
        ))
    }
}

fn javascript_url(_c: &Candidate<'_>) -> Option<String> {
    Some("link uses a javascript: URL; use a <button> for scripted actions".to_string())
}

fn target_blank(_c: &Candidate<'_>) -> Option<String> {
    Some("link opens a new window without rel=\"noopener\"".to_string())
}

fn positive_tabindex(c: &Candidate<'_>) -> Option<String> {
    let value = c.element.attribute("tabindex")?;
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Some(format!(
            "tabindex=\"{}\" is positive and disrupts the natural tab order; use 0 or -1",
            value
        )),
        Ok(_) => None,
        Err(_) => Some(format!("tabindex=\"{}\" is not a valid integer", value)),
    }
}

fn heading_level(element: &ElementRef<'_>) -> Option<u8> {
    element.tag().strip_prefix('h').and_then(|n| n.parse::<u8>().ok())
}

fn heading_order(c: &Candidate<'_>) -> Option<String> {
    let previous = heading_level(&c.previous()?)?;
    let current = heading_level(&c.element)?;
    if current > previous + 1 {
        Some(format!(
            "heading level skipped from <h{}> to <h{}>",
            previous, current
        ))
    } else {
        None
    }
}

fn redundant_role(c: &Candidate<'_>) -> Option<String> {
    let tag = c.element.tag();
    let role = c.element.attribute("role")?.trim().to_ascii_lowercase();
    let implicit = REDUNDANT_ROLES.iter().find(|(t, r)| *t == tag && *r == role)?;
    if implicit.0 == "a" && !c.element.has_attr("href") {
        return None;
    }
    Some(format!(
        "role=\"{}\" is redundant; <{}> already has this role",
        role, tag
    ))
}

fn div_button(c: &Candidate<'_>) -> Option<String> {
    Some(format!(
        "<{}> with role=\"button\" should be a native <button> for keyboard and screen reader support",
        c.element.tag()
    ))
}

fn onclick_no_keyboard(c: &Candidate<'_>) -> Option<String> {
    let el = &c.element;
    let has_key_handler =
        el.has_attr("onkeydown") || el.has_attr("onkeypress") || el.has_attr("onkeyup");
    if has_key_handler || (el.has_attr("role") && el.has_attr("tabindex")) {
        return None;
    }
    Some(format!(
        "<{}> has an onclick handler but no keyboard equivalent",
        el.tag()
    ))
}

fn link_name(c: &Candidate<'_>) -> Option<String> {
    let el = &c.element;
    if !el.trimmed_text().is_empty() || el.has_label_attribute() || el.has_labelled_image() {
        return None;
    }
    Some("link has no accessible name: no text, aria-label or labelled image".to_string())
}

fn generic_link_text(c: &Candidate<'_>) -> Option<String> {
    if c.element.attr_state("aria-label").is_meaningful() {
        return None;
    }
    let text = c.element.trimmed_text();
    let normalized = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if GENERIC_LINK_TEXT.contains(&normalized.as_str()) {
        Some(format!(
            "link text \"{}\" does not describe the destination",
            text
        ))
    } else {
        None
    }
}

fn generic_alt(c: &Candidate<'_>) -> Option<String> {
    let AttrState::Value(alt) = c.element.attr_state("alt") else {
        return None;
    };
    let lower = alt.trim().to_lowercase();

    if GENERIC_ALT_VALUES.contains(&lower.as_str()) {
        Some(format!(
            "alt text \"{}\" is generic; describe what the image shows",
            alt
        ))
    } else if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Some(format!(
            "alt text \"{}\" appears to be a file name; describe what the image shows",
            alt
        ))
    } else {
        None
    }
}

fn video_captions(c: &Candidate<'_>) -> Option<String> {
    let track = Selector::parse("track").expect("valid selector");
    let has_captions = c.element.select(&track).any(|t| {
        matches!(
            t.attribute("kind").map(|k| k.to_ascii_lowercase()).as_deref(),
            Some("captions") | Some("subtitles")
        )
    });
    if has_captions {
        None
    } else {
        Some("video has no captions or subtitles track".to_string())
    }
}

fn autoplay_media(c: &Candidate<'_>) -> Option<String> {
    Some(format!(
        "<{}> starts playing automatically with sound; add muted or let the user start playback",
        c.element.tag()
    ))
}

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use crate::engine::evaluate;
    use crate::rules::find;
    use crate::violation::Violation;

    fn run(rule_id: &str, html: &str) -> Vec<Violation> {
        let rule = find(rule_id).expect("rule exists");
        evaluate(&Document::parse(html), rule).expect("evaluate")
    }

    #[test]
    fn test_insecure_url() {
        let html = r#"<a href="http://example.com">x</a><img src="https://example.com/a.png" alt=""><script src="http://cdn.example.com/a.js"></script>"#;
        let violations = run("insecure-url", html);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("href=\"http://example.com\""));
        assert_eq!(violations[1].tag, "script");
    }

    #[test]
    fn test_javascript_url() {
        assert_eq!(run("javascript-url", r#"<a href="javascript:void(0)">x</a><a href="/">y</a>"#).len(), 1);
    }

    #[test]
    fn test_target_blank() {
        let html = r#"<a href="/a" target="_blank">a</a><a href="/b" target="_blank" rel="external noopener">b</a><a href="/c" target="_blank" rel="noreferrer">c</a>"#;
        assert_eq!(run("target-blank-noopener", html).len(), 1);
    }

    #[test]
    fn test_positive_tabindex() {
        let violations = run("positive-tabindex", r#"<div tabindex="5">a</div><div tabindex="0">b</div><div tabindex="-1">c</div><div tabindex="x">d</div>"#);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("positive"));
        assert!(violations[1].message.contains("not a valid integer"));
    }

    #[test]
    fn test_heading_order() {
        let violations = run("heading-order", "<h1>A</h1><h3>B</h3><h4>C</h4><h2>D</h2>");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "heading level skipped from <h1> to <h3>");
    }

    #[test]
    fn test_redundant_role() {
        let violations = run("redundant-role", r#"<nav role="navigation"></nav><a role="link">anchor</a><div role="navigation"></div>"#);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tag, "nav");
    }

    #[test]
    fn test_div_button() {
        assert_eq!(run("div-button", r#"<div role="button">x</div><button>y</button>"#).len(), 1);
    }

    #[test]
    fn test_onclick_no_keyboard() {
        let html = r#"<div onclick="go()">a</div><div onclick="go()" onkeydown="go()">b</div><span onclick="go()" role="button" tabindex="0">c</span>"#;
        assert_eq!(run("onclick-no-keyboard", html).len(), 1);
    }

    #[test]
    fn test_link_name() {
        let html = r#"<a href="/"></a><a href="/a" aria-label="Home"></a><a href="/b"><img src="b.png" alt="Blog"></a><a name="top"></a>"#;
        assert_eq!(run("link-name", html).len(), 1);
    }

    #[test]
    fn test_generic_link_text() {
        let violations = run("generic-link-text", r#"<a href="/a">Click   here</a><a href="/b">Pricing</a><a href="/c" aria-label="Read more about pricing">Read more</a>"#);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Click   here"));
    }

    #[test]
    fn test_generic_alt() {
        let html = r#"<img src="a.jpg" alt="image"><img src="b.jpg" alt="hero-banner.JPG"><img src="c.jpg" alt="Team photo at the 2024 summit"><img src="d.jpg" alt="">"#;
        let violations = run("generic-alt", html);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("generic"));
        assert!(violations[1].message.contains("file name"));
    }

    #[test]
    fn test_video_captions() {
        let html = r#"<video src="a.mp4"></video><video src="b.mp4"><track kind="captions" src="b.vtt"></video>"#;
        assert_eq!(run("video-captions", html).len(), 1);
    }

    #[test]
    fn test_autoplay_media() {
        let html = r#"<video autoplay src="a.mp4"></video><video autoplay muted src="b.mp4"></video><audio autoplay src="c.mp3"></audio>"#;
        assert_eq!(run("autoplay-media", html).len(), 2);
    }
}
