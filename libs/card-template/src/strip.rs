//! HTML to plain text, for `{{text:Field}}`.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Renders the visible text of an HTML fragment, dropping tags.
pub trait HtmlStripper: Send + Sync {
    fn strip(&self, html: &str) -> String;
}

/// Parses the fragment into a DOM and concatenates its text nodes.
///
/// Whitespace is kept as written; `<br>` becomes a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomStripper;

impl HtmlStripper for DomStripper {
    fn strip(&self, html: &str) -> String {
        if !html.contains(&['<', '&'][..]) {
            return html.to_string();
        }

        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        let mut text = String::with_capacity(html.len());
        collect_text(&dom.document, &mut text);
        text
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        NodeData::Element { name, .. } => {
            let tag = name.local.as_ref();

            // Not rendered as text
            if matches!(tag, "script" | "style" | "template" | "title") {
                return;
            }
            if tag == "br" {
                out.push('\n');
            }

            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {}
    }
}

/// Returns its input unchanged. Used where the text output is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStripper;

impl HtmlStripper for IdentityStripper {
    fn strip(&self, html: &str) -> String {
        html.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_tags() {
        assert_eq!(DomStripper.strip("<b>Ottawa</b>"), "Ottawa");
    }

    #[test]
    fn keeps_plain_text() {
        assert_eq!(DomStripper.strip("  plain text "), "  plain text ");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(DomStripper.strip("Fish &amp; <i>chips</i>"), "Fish & chips");
    }

    #[test]
    fn skips_scripts_and_styles() {
        let text = DomStripper.strip("<style>p { color: red }</style><p>Safe</p><script>alert(1)</script>");
        assert_eq!(text, "Safe");
    }

    #[test]
    fn line_breaks_become_newlines() {
        assert_eq!(DomStripper.strip("one<br>two"), "one\ntwo");
    }

    #[test]
    fn identity_returns_input() {
        assert_eq!(IdentityStripper.strip("<b>x</b>"), "<b>x</b>");
    }
}
