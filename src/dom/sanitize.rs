//! Analysis-ready copy of a document.
//!
//! The caller's tree is never touched. The sanitized tree is rebuilt by
//! omission: excluded regions and comments are left out, then the
//! technical filter drops code elements and line-filters leaked code.

use crate::dom::filter::{FilterStats, TechnicalFilter};
use crate::dom::{DomNode, DomTree, NodeType};

/// Statistics from a sanitization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    pub excluded_regions: usize,
    pub comments_dropped: usize,
    pub technical: FilterStats,
}

const EXCLUDED_CLASSES: &[&str] = &["seo-exclude", "noindex", "no-index", "robots-nocontent"];
const EXCLUDED_FLAG_ATTRS: &[&str] = &["data-nosnippet", "data-noindex"];
const ROBOTS_KEYWORDS: &[&str] = &["noindex", "nosnippet"];

const COMMENT_OPEN: &[&str] = &["noindex", "googleoff: index", "googleoff: all"];
const COMMENT_CLOSE: &[&str] = &["/noindex", "googleon: index", "googleon: all"];

/// Elements that may legitimately carry a page-level robots meta.
const PAGE_LEVEL: &[&str] = &["head", "html", "body"];

pub struct DocumentSanitizer {
    filter: TechnicalFilter,
}

impl DocumentSanitizer {
    pub fn new() -> Self {
        Self {
            filter: TechnicalFilter::new(),
        }
    }

    pub fn sanitize(&self, tree: &DomTree) -> (DomTree, SanitizeStats) {
        let mut stats = SanitizeStats::default();

        let root = strip_excluded(&tree.root, &mut stats)
            .and_then(|r| self.filter.clean(&r, &mut stats.technical))
            .unwrap_or_else(|| DomNode::document(Vec::new()));

        log::debug!(
            "sanitized {}: {} excluded regions, {} technical elements, {} text nodes filtered",
            tree.url,
            stats.excluded_regions,
            stats.technical.removed_elements,
            stats.technical.filtered_text_nodes
        );

        let sanitized = DomTree {
            root,
            url: tree.url.clone(),
            title: tree.title.clone(),
            lang: tree.lang.clone(),
        };
        (sanitized, stats)
    }
}

impl Default for DocumentSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper discarding the statistics.
pub fn sanitize(tree: &DomTree) -> DomTree {
    DocumentSanitizer::new().sanitize(tree).0
}

/// Whether an element is explicitly marked as outside the analysable content.
pub fn is_excluded(node: &DomNode) -> bool {
    if !node.is_element() {
        return false;
    }
    if node.tag == "noindex" {
        return true;
    }
    if let Some(v) = node.attr("data-seo-exclude") {
        if !v.trim().eq_ignore_ascii_case("false") {
            return true;
        }
    }
    if EXCLUDED_FLAG_ATTRS.iter().any(|a| node.attributes.has(a)) {
        return true;
    }
    if EXCLUDED_CLASSES.iter().any(|c| node.attributes.has_class(c)) {
        return true;
    }
    if node.attr("data-robots").is_some_and(mentions_robots_exclusion) {
        return true;
    }
    !PAGE_LEVEL.contains(&node.tag.as_str()) && node.children.iter().any(is_robots_meta_exclusion)
}

fn mentions_robots_exclusion(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    ROBOTS_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn is_robots_meta_exclusion(node: &DomNode) -> bool {
    node.tag == "meta"
        && node.attr("name").is_some_and(|n| n.eq_ignore_ascii_case("robots"))
        && node.attr("content").is_some_and(mentions_robots_exclusion)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentDirective {
    Open,
    Close,
}

fn comment_directive(text: &str) -> Option<CommentDirective> {
    let t = text.trim().to_ascii_lowercase();
    if COMMENT_OPEN.contains(&t.as_str()) {
        Some(CommentDirective::Open)
    } else if COMMENT_CLOSE.contains(&t.as_str()) {
        Some(CommentDirective::Close)
    } else {
        None
    }
}

fn strip_excluded(node: &DomNode, stats: &mut SanitizeStats) -> Option<DomNode> {
    if is_excluded(node) {
        stats.excluded_regions += 1;
        return None;
    }
    if node.node_type == NodeType::Text {
        return Some(node.clone());
    }

    // A comment range runs to its closing directive or the end of the parent.
    let mut excluding = false;
    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        if child.node_type == NodeType::Comment {
            stats.comments_dropped += 1;
            match comment_directive(&child.text) {
                Some(CommentDirective::Open) => {
                    if !excluding {
                        stats.excluded_regions += 1;
                    }
                    excluding = true;
                }
                Some(CommentDirective::Close) => excluding = false,
                None => {}
            }
            continue;
        }
        if excluding {
            continue;
        }
        if let Some(kept) = strip_excluded(child, stats) {
            children.push(kept);
        }
    }

    Some(DomNode {
        tag: node.tag.clone(),
        attributes: node.attributes.clone(),
        text: node.text.clone(),
        children,
        node_type: node.node_type,
    })
}
