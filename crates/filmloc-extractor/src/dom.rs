//! Text helpers over parsed HTML documents.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements whose start introduces a line break in collected text.
const BLOCK_ELEMENTS: [&str; 16] = [
    "p", "div", "li", "ul", "ol", "dl", "dt", "dd", "tr", "td", "th", "table", "br", "section",
    "blockquote", "h5",
];

/// Elements whose content never contributes to collected text.
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// `true` for `h1`..`h6`, and for the wrapper `div`s some wikis put
/// around headings (`<div class="mw-heading mw-heading2">`).
pub(crate) fn is_heading(node: ego_tree::NodeRef<'_, Node>) -> bool {
    let Some(el) = node.value().as_element() else {
        return false;
    };
    matches!(el.name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
        || (el.name() == "div" && el.classes().any(|c| c == "mw-heading"))
}

/// Collect the text below `node`, inserting a newline before every block
/// element so list items and paragraphs stay separable.
///
/// Citation markers (`<sup class="reference">`) and script/style bodies are
/// skipped. The walk is iterative so deeply nested documents cannot exhaust
/// the stack.
pub(crate) fn block_text(node: ego_tree::NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        match current.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "sup" && el.classes().any(|c| c == "reference") {
                    continue;
                }
                if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                }
                let children: Vec<_> = current.children().collect();
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }

    out
}

/// Whitespace-collapsed, trimmed text of an element.
pub(crate) fn inline_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&block_text(*el))
}

/// Collapse runs of whitespace into a single space and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first element matching `selector`, if non-empty.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(inline_text)
        .find(|text| !text.is_empty())
}
