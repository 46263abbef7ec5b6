//! HTML rich-text cleanup
//!
//! Tracker exports store updates, actions and release notes as HTML
//! fragments. Slides need plain text with one sentence or paragraph per line.

use scraper::{Html, Node};

/// Encoding debris left behind by the export tool
const DEBRIS: [(&str, &str); 4] = [
    ("\u{e2}\u{20ac}\u{2039}", ""),
    ("\u{200b}", ""),
    ("&%23160;", ""),
    ("&%2358;", ":"),
];

/// Convert an HTML fragment to plain text.
///
/// Text nodes are trimmed and concatenated. A line break follows any text
/// ending with a full stop and any text sitting directly inside a `<p>`.
/// Blank input produces an empty string.
pub fn html_to_text(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(input);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let chunk: &str = chunk;
        let stripped = chunk.trim();
        if stripped.is_empty() {
            continue;
        }
        text.push_str(stripped);

        let in_paragraph = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name() == "p"))
            .unwrap_or(false);
        if stripped.ends_with('.') || in_paragraph {
            text.push('\n');
        }
    }

    text = decode_residual_entities(&text);
    for (debris, replacement) in DEBRIS {
        text = text.replace(debris, replacement);
    }
    text = text.replace("\r\n", "\n");

    text.trim().to_string()
}

/// Decode entities that survived the first parse (double-escaped input).
///
/// Angle brackets already in the text are re-escaped so the second parse
/// only decodes references and never sees markup.
fn decode_residual_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let escaped = text.replace('<', "&lt;").replace('>', "&gt;");
    Html::parse_fragment(&escaped).root_element().text().collect()
}
