pub mod parser;
pub mod filter;
pub mod sanitize;

use std::collections::HashMap;

/// Typed attribute map.
///
/// Lookups return `Option<&str>`: an absent attribute is `None`, an empty
/// one is `Some("")`. Callers decide explicitly which of the two they care
/// about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    map: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|s| s.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.map.insert(name.into(), value.into());
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or("").split_whitespace()
    }

    /// Case-insensitive class membership.
    pub fn has_class(&self, name: &str) -> bool {
        self.class_list().any(|c| c.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
}

/// Owned document node. Children belong exclusively to their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub tag: String,
    pub attributes: Attributes,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            tag: "#document".into(),
            attributes: Attributes::new(),
            text: String::new(),
            children,
            node_type: NodeType::Document,
        }
    }

    pub fn element(tag: impl Into<String>, attrs: Attributes, children: Vec<DomNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: Attributes::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: Attributes::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Recursively count all nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Concatenated text of every descendant text node, comments excluded.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        self.text_content_inner(&mut buf);
        buf
    }

    fn text_content_inner(&self, buf: &mut String) {
        match self.node_type {
            NodeType::Text => {
                let t = self.text.trim();
                if !t.is_empty() {
                    if !buf.is_empty() {
                        buf.push(' ');
                    }
                    buf.push_str(t);
                }
            }
            NodeType::Comment => {}
            NodeType::Element | NodeType::Document => {
                for child in &self.children {
                    child.text_content_inner(buf);
                }
            }
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Depth-first, document-order visit of every element in this subtree
    /// (including `self` when it is an element).
    pub fn walk_elements<'a>(&'a self, visit: &mut impl FnMut(&'a DomNode)) {
        if self.is_element() {
            visit(self);
        }
        for child in &self.children {
            child.walk_elements(visit);
        }
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a DomNode> {
        let mut found = Vec::new();
        self.walk_elements(&mut |n| {
            if n.tag == tag {
                found.push(n);
            }
        });
        found
    }

    pub fn count_tag(&self, tag: &str) -> usize {
        let mut count = 0;
        self.walk_elements(&mut |n| {
            if n.tag == tag {
                count += 1;
            }
        });
        count
    }
}

/// Parsed document with page metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
    /// Declared `<html lang>` value, if any.
    pub lang: Option<String>,
}

impl DomTree {
    /// Wrap an already-built root, e.g. from a test fixture.
    pub fn from_root(root: DomNode) -> Self {
        Self {
            root,
            url: String::new(),
            title: String::new(),
            lang: None,
        }
    }

    /// The `<body>` element, falling back to the root.
    pub fn body(&self) -> &DomNode {
        self.root.find_all("body").into_iter().next().unwrap_or(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn attribute_presence_is_not_truthiness() {
        let a = attrs(&[("alt", ""), ("width", "0")]);
        assert_eq!(a.get("alt"), Some(""));
        assert_eq!(a.get("width"), Some("0"));
        assert_eq!(a.get("title"), None);
        assert!(a.has("alt"));
        assert!(!a.has("title"));
    }

    #[test]
    fn class_membership_is_token_based() {
        let a = attrs(&[("class", "post  Entry-Content highlighted")]);
        assert!(a.has_class("entry-content"));
        assert!(!a.has_class("entry"));
        assert_eq!(a.class_list().count(), 3);
    }

    #[test]
    fn text_content_skips_comments() {
        let node = DomNode::element(
            "p",
            Attributes::new(),
            vec![
                DomNode::text("Hello"),
                DomNode::comment("hidden"),
                DomNode::element("b", Attributes::new(), vec![DomNode::text(" world ")]),
            ],
        );
        assert_eq!(node.text_content(), "Hello world");
        assert!(node.is_element());
    }

    #[test]
    fn find_all_is_document_order() {
        let root = DomNode::element(
            "body",
            Attributes::new(),
            vec![
                DomNode::element("h2", Attributes::new(), vec![DomNode::text("a")]),
                DomNode::element(
                    "div",
                    Attributes::new(),
                    vec![DomNode::element("h2", Attributes::new(), vec![DomNode::text("b")])],
                ),
            ],
        );
        let titles: Vec<String> = root.find_all("h2").iter().map(|n| n.text_content()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(root.count_tag("h2"), 2);
        assert_eq!(root.node_count(), 6);
    }
}
