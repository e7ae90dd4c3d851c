//! HTML helpers shared by the platform extractors
//!
//! Extractors are written as ordered lists of strategies. Each strategy
//! looks at the parsed page one way and returns the first plausible value;
//! the first strategy to succeed wins.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// One way of locating a value in a parsed page
pub type Strategy<T> = fn(&Html) -> Option<T>;

/// Elements whose text never renders
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Runs strategies in order and returns the first hit
pub fn first_match<T>(document: &Html, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(document))
}

/// Selects all elements matching `css` in the document
///
/// An unparseable selector matches nothing.
pub fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Selects all descendants of `element` matching `css`
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Text a reader would see on the page, one space between text nodes
pub fn visible_text(document: &Html) -> String {
    element_text(document.root_element())
}

/// Visible text of one element and its descendants
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let text: &str = text;
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

/// Text of the element's direct text children only
pub fn own_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text: &str = text;
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

/// Raw text of every `<script>` element, including JSON payloads
pub fn script_texts(document: &Html) -> Vec<String> {
    select_all(document, "script")
        .into_iter()
        .map(|script| script.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Nearest ancestor that is an element
pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Returns true if the element carries `class`
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Parses a displayed count such as `1,234` or `1.2k`
pub fn parse_count(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let lower = cleaned.to_ascii_lowercase();

    if let Some(number) = lower.strip_suffix('k') {
        let value: f64 = number.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        return Some((value * 1000.0).round() as u64);
    }

    lower.parse().ok()
}

/// First capture group of `re` in `text`, parsed as a count
pub fn capture_count(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_count(m.as_str()))
}

/// Every capture of `re` in `text`, in order, parsed as counts
pub fn capture_counts(re: &Regex, text: &str) -> Vec<u64> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| parse_count(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"<html><head><style>.a{}</style><script>var x = 1;</script></head>
            <body><p>Hello</p><noscript>nojs</noscript><div>World <b>again</b></div></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(visible_text(&document), "Hello World again");
    }

    #[test]
    fn test_own_text_ignores_children() {
        let document = Html::parse_document("<div>Rating: <span>1500</span></div>");
        let div = select_all(&document, "div")[0];
        assert_eq!(own_text(div), "Rating:");
        assert_eq!(element_text(div), "Rating: 1500");
    }

    #[test]
    fn test_parent_element() {
        let document = Html::parse_document(r#"<ul class="x"><li><span>a</span></li></ul>"#);
        let span = select_all(&document, "span")[0];
        let li = parent_element(span).unwrap();
        assert_eq!(li.value().name(), "li");
        assert!(has_class(parent_element(li).unwrap(), "x"));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let document = Html::parse_document("<p>a</p>");
        assert!(select_all(&document, "p[").is_empty());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("1.2k"), Some(1200));
        assert_eq!(parse_count("3K"), Some(3000));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("abc"), None);
    }

    #[test]
    fn test_first_match_stops_at_first_hit() {
        fn none(_: &Html) -> Option<u32> {
            None
        }
        fn one(_: &Html) -> Option<u32> {
            Some(1)
        }
        fn two(_: &Html) -> Option<u32> {
            Some(2)
        }

        let document = Html::parse_document("");
        assert_eq!(first_match(&document, &[none, one, two]), Some(1));
        assert_eq!(first_match::<u32>(&document, &[none]), None);
    }

    #[test]
    fn test_capture_counts() {
        let re = Regex::new(r"(\d[\d,]*) items").unwrap();
        assert_eq!(capture_count(&re, "1,500 items and 3 items"), Some(1500));
        assert_eq!(capture_counts(&re, "1,500 items and 3 items"), vec![1500, 3]);
    }
}
