//! Technical-content filter.
//!
//! Separates editorial prose from code and markup that leaked into the
//! page text. Structural code elements (`script`, `style`, `pre`, ...) are
//! dropped whole; prose is filtered line by line so a paragraph that merely
//! contains a stray snippet keeps its real sentences.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{DomNode, NodeType};

/// Statistics from the technical filtering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub removed_elements: usize,
    pub filtered_text_nodes: usize,
}

/// Element types that hold code rather than prose.
pub const TECHNICAL_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "code", "pre", "samp", "kbd",
];

/// Class names that mark a container as the page's editorial body.
const IMPORTANT_CLASSES: &[&str] = &[
    "content",
    "main-content",
    "post-content",
    "entry-content",
    "article-body",
    "article-content",
];

const IMPORTANT_TAGS: &[&str] = &["article", "main"];
const IMPORTANT_ROLES: &[&str] = &["main", "article"];

/// Code and markup idioms that never occur in editorial prose.
const TECHNICAL_PATTERN_SOURCES: &[&str] = &[
    // function declarations / expressions
    r"(?i)\bfunction\s*[\w$]*\s*\([^)]*\)\s*\{",
    // variable declarations
    r"\b(?:var|let|const)\s+[A-Za-z_$][\w$]*\s*=",
    // arrow functions
    r"\)\s*=>|=>\s*\{",
    // inline event handlers
    r"(?i)\bon(?:click|load|change|submit|input|focus|blur|error|mouse[a-z]+|key[a-z]+)\s*=",
    r"\.addEventListener\s*\(",
    // DOM / host API access
    r"\b(?:document|window)\.[A-Za-z_$][\w$]*",
    r"\bconsole\.(?:log|warn|error|info|debug)\s*\(",
    // template interpolation
    r"\$\{[^}]*\}",
    r"\{\{[^}]*\}\}",
    r"\{%[^%]*%\}",
    // stray script/style tags
    r"(?i)</?\s*(?:script|style)\b",
    r"\breturn\s+[^;.!?]*;",
    // JSON-LD and CSS bodies
    r#""@(?:context|type|id)"\s*:"#,
    r"\{\s*[a-z-]+\s*:\s*[^;{}]+;",
    r"@media\s[^{]*\{",
    r"!important\b",
];

static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    TECHNICAL_PATTERN_SOURCES
        .iter()
        .filter_map(|src| match Regex::new(src) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("invalid technical pattern {src:?}: {e}");
                None
            }
        })
        .collect()
});

/// Whether any line of `text` matches a technical pattern. Patterns are
/// applied line by line, never across a line break.
pub fn is_technical(text: &str) -> bool {
    text.lines().any(is_technical_line)
}

fn is_technical_line(line: &str) -> bool {
    TECHNICAL_PATTERNS.iter().any(|re| re.is_match(line))
}

pub fn is_technical_tag(tag: &str) -> bool {
    TECHNICAL_TAGS.contains(&tag)
}

/// Whether this element is one of the allow-listed editorial containers.
pub fn is_important_container(node: &DomNode) -> bool {
    if !node.is_element() {
        return false;
    }
    if IMPORTANT_TAGS.contains(&node.tag.as_str()) {
        return true;
    }
    if let Some(role) = node.attr("role") {
        if IMPORTANT_ROLES.iter().any(|r| role.eq_ignore_ascii_case(r)) {
            return true;
        }
    }
    IMPORTANT_CLASSES.iter().any(|c| node.attributes.has_class(c))
}

/// Drop technical lines from `text`.
///
/// Lines that match nothing pass through (trimmed). A matching line is cut
/// into clauses and only clauses shaped like prose survive. Every kept line
/// is non-technical, so the result never matches a technical pattern.
pub fn filter_technical_lines(text: &str) -> String {
    let kept: Vec<String> = text
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            if !is_technical_line(line) {
                return Some(line.to_string());
            }
            let clauses: Vec<&str> = split_clauses(line)
                .into_iter()
                .map(trim_clause_residue)
                .filter(|c| !c.is_empty() && looks_like_prose(c) && !is_technical_line(c))
                .collect();
            if clauses.is_empty() {
                return None;
            }
            let joined = clauses.join(" ");
            (!is_technical_line(&joined)).then_some(joined)
        })
        .collect();

    kept.join("\n")
}

/// Cut after `. ! ? ; }` when followed by whitespace or end of line.
fn split_clauses(line: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | ';' | '}') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                clauses.push(&line[start..end]);
                start = end;
            }
        }
    }
    if start < line.len() {
        clauses.push(&line[start..]);
    }
    clauses
}

/// Strip what the previous clause left behind (`} and more` -> `and more`).
fn trim_clause_residue(clause: &str) -> &str {
    clause
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '}' | ')' | ';'))
        .trim_end()
}

/// Characters that never appear in editorial sentences.
const CODE_CHARS: &[char] = &['(', ')', '[', ']', '{', '}', '=', '<', '>', '"', '`', '|', '&', '$', '\\'];

/// A clause of a technical line is kept only when nothing in it reads as code.
/// Apostrophes are allowed inside words (`don't`), never as quotes.
fn looks_like_prose(clause: &str) -> bool {
    if clause.contains(CODE_CHARS) {
        return false;
    }
    let chars: Vec<char> = clause.chars().collect();
    chars.iter().enumerate().all(|(i, &c)| {
        c != '\'' || (i > 0 && i + 1 < chars.len() && chars[i - 1].is_alphabetic() && chars[i + 1].is_alphabetic())
    })
}

/// Removes technical elements and line-filters technical prose.
pub struct TechnicalFilter;

impl TechnicalFilter {
    pub fn new() -> Self {
        Self
    }

    /// Rebuild `node` without its technical content. Returns `None` when
    /// the node itself is a technical element outside any editorial
    /// container.
    pub fn clean(&self, node: &DomNode, stats: &mut FilterStats) -> Option<DomNode> {
        clean_recursive(node, false, stats)
    }
}

impl Default for TechnicalFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_recursive(node: &DomNode, in_important: bool, stats: &mut FilterStats) -> Option<DomNode> {
    match node.node_type {
        NodeType::Text => {
            if !is_technical(&node.text) {
                return Some(node.clone());
            }
            stats.filtered_text_nodes += 1;
            let filtered = filter_technical_lines(&node.text);
            log::trace!("filtered technical text ({} -> {} bytes)", node.text.len(), filtered.len());
            Some(DomNode::text(filtered))
        }
        NodeType::Comment => Some(node.clone()),
        NodeType::Element if is_technical_tag(&node.tag) && !in_important => {
            stats.removed_elements += 1;
            None
        }
        NodeType::Element | NodeType::Document => {
            let inside = in_important || is_important_container(node);
            let children = node
                .children
                .iter()
                .filter_map(|c| clean_recursive(c, inside, stats))
                .filter(|c| c.node_type != NodeType::Text || !c.text.trim().is_empty())
                .collect();
            Some(DomNode {
                tag: node.tag.clone(),
                attributes: node.attributes.clone(),
                text: node.text.clone(),
                children,
                node_type: node.node_type,
            })
        }
    }
}
