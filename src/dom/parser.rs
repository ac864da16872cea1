use crate::dom::{Attributes, DomNode, DomTree};
use scraper::{ElementRef, Html, Node};

/// Tags whose children carry no prose and are dropped at parse time.
/// Script/style text is kept: the sanitizer needs to see it.
const SKIP_CHILDREN: &[&str] = &["svg", "math"];

/// Parse raw HTML string into a DomTree
pub fn parse_html(html: &str, url: &str) -> DomTree {
    let document = Html::parse_document(html);

    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let html_el = document.root_element();
    let lang = html_el
        .value()
        .attr("lang")
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let root = DomNode::document(vec![convert_element(html_el)]);
    log::debug!("parsed {} ({} nodes)", url, root.node_count());

    DomTree {
        root,
        url: url.to_string(),
        title: title.trim().to_string(),
        lang,
    }
}

fn convert_element(el: ElementRef<'_>) -> DomNode {
    let tag = el.value().name.local.as_ref().to_string();
    let attributes: Attributes = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if SKIP_CHILDREN.contains(&tag.as_str()) {
        return DomNode::element(tag, attributes, Vec::new());
    }

    let mut children = Vec::new();

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    children.push(convert_element(child_el));
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if !s.trim().is_empty() {
                    children.push(DomNode::text(s));
                }
            }
            Node::Comment(c) => {
                children.push(DomNode::comment(c.comment.to_string()));
            }
            _ => {}
        }
    }

    DomNode::element(tag, attributes, children)
}
