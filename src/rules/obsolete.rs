// SPDX-License-Identifier: PMPL-1.0-or-later
//! Obsolete features: elements and attributes removed from HTML.

use crate::engine::{Candidate, Rule};
use crate::node::NodeExt;
use crate::violation::Category;

/// Removed elements and what replaces them
const OBSOLETE_ELEMENTS: &[(&str, &str)] = &[
    ("acronym", "use <abbr>"),
    ("applet", "use <object> or <embed>"),
    ("basefont", "use CSS font properties"),
    ("bgsound", "use <audio>"),
    ("big", "use CSS font-size"),
    ("blink", "use CSS animations"),
    ("center", "use CSS text-align or margin"),
    ("dir", "use <ul>"),
    ("font", "use CSS font properties"),
    ("frame", "use <iframe> or CSS layout"),
    ("frameset", "use <iframe> or CSS layout"),
    ("isindex", "use a <form> with an <input>"),
    ("keygen", "use the Web Crypto API"),
    ("listing", "use <pre> and <code>"),
    ("marquee", "use CSS animations"),
    ("multicol", "use CSS columns"),
    ("nextid", "use GUIDs"),
    ("nobr", "use CSS white-space: nowrap"),
    ("noembed", "use <object> fallback content"),
    ("noframes", "use <iframe> or CSS layout"),
    ("rb", "put the base text directly in <ruby>"),
    ("rtc", "use <rt> inside <ruby>"),
    ("spacer", "use CSS margins or padding"),
    ("strike", "use <del> or <s>"),
    ("tt", "use <code>, <kbd> or <samp>"),
    ("xmp", "use <pre> and <code>"),
];

/// Removed attributes; the tag restricts where the attribute is obsolete
const OBSOLETE_ATTRIBUTES: &[(&str, Option<&str>)] = &[
    ("align", None),
    ("axis", None),
    ("background", None),
    ("bgcolor", None),
    ("cellpadding", None),
    ("cellspacing", None),
    ("char", None),
    ("charoff", None),
    ("clear", None),
    ("compact", None),
    ("frameborder", None),
    ("hspace", None),
    ("longdesc", None),
    ("marginheight", None),
    ("marginwidth", None),
    ("noshade", None),
    ("nowrap", None),
    ("rev", None),
    ("scrolling", None),
    ("valign", None),
    ("vspace", None),
    ("charset", Some("a")),
    ("charset", Some("link")),
    ("summary", Some("table")),
    ("language", Some("script")),
    ("version", Some("html")),
    ("profile", Some("head")),
    ("border", Some("img")),
];

pub const RULES: &[Rule] = &[
    Rule {
        id: "obsolete-element",
        category: Category::Obsolete,
        selector: "acronym, applet, basefont, bgsound, big, blink, center, dir, font, frame, frameset, isindex, keygen, listing, marquee, multicol, nextid, nobr, noembed, noframes, rb, rtc, spacer, strike, tt, xmp",
        description: "Elements removed from HTML",
        check: obsolete_element,
    },
    Rule {
        id: "obsolete-attribute",
        category: Category::Obsolete,
        selector: "[align], [axis], [background], [bgcolor], [cellpadding], [cellspacing], [char], [charoff], [clear], [compact], [frameborder], [hspace], [longdesc], [marginheight], [marginwidth], [noshade], [nowrap], [rev], [scrolling], [valign], [vspace], a[charset], link[charset], table[summary], script[language], html[version], head[profile], img[border]",
        description: "Presentational and removed attributes",
        check: obsolete_attributes,
    },
    Rule {
        id: "obsolete-anchor-name",
        category: Category::Obsolete,
        selector: "a[name]",
        description: "Use id instead of name on anchors",
        check: anchor_name,
    },
];

fn obsolete_element(c: &Candidate<'_>) -> Option<String> {
    let tag = c.element.tag();
    let (_, replacement) = OBSOLETE_ELEMENTS.iter().find(|(t, _)| *t == tag)?;
    Some(format!("<{}> is obsolete; {}", tag, replacement))
}

fn obsolete_attributes(c: &Candidate<'_>) -> Option<String> {
    let tag = c.element.tag();
    let mut present: Vec<&str> = OBSOLETE_ATTRIBUTES
        .iter()
        .filter(|(_, only_on)| only_on.map_or(true, |t| t == tag))
        .map(|(attr, _)| *attr)
        .filter(|attr| c.element.has_attr(attr))
        .collect();
    present.dedup();

    if present.is_empty() {
        None
    } else {
        Some(format!(
            "obsolete attribute(s) {} on <{}>; use CSS or current HTML instead",
            present.join(", "),
            tag
        ))
    }
}

fn anchor_name(c: &Candidate<'_>) -> Option<String> {
    let name = c.element.attribute("name")?;
    Some(format!(
        "name=\"{}\" on <a> is obsolete; put id=\"{}\" on the target element",
        name, name
    ))
}
