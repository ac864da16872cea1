//! Text statistics over the sanitized tree.
//!
//! Only SEO-relevant elements contribute words. Each piece of text is
//! attributed to its nearest whitelisted ancestor, so an `<article>`
//! wrapping `<p>`s does not count the paragraphs twice.

use serde::Serialize;

use crate::dom::filter::is_technical;
use crate::dom::{DomNode, NodeType};

/// Elements whose text counts as page content.
pub const CONTENT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "article", "section", "main",
];

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub total_chars: usize,
    pub total_words: usize,
    /// Words containing at least one letter; numbers and symbols excluded.
    pub content_words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lists: usize,
    pub tables: usize,
    pub reading_time_minutes: usize,
    pub avg_sentence_length: usize,
    pub avg_paragraph_length: usize,
}

/// Editorial text segments, one per whitelisted element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentText {
    pub segments: Vec<String>,
}

impl ContentText {
    pub fn extract(root: &DomNode) -> Self {
        let mut segments = Vec::new();
        collect_segments(root, &mut segments);
        let segments = segments
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !is_technical(s))
            .collect();
        Self { segments }
    }

    pub fn words(&self) -> Vec<&str> {
        self.segments.iter().flat_map(|s| s.split_whitespace()).collect()
    }

    pub fn sentence_count(&self) -> usize {
        self.segments.iter().map(|s| count_sentences(s)).sum()
    }

    /// Segments joined by newlines, for keyword mining.
    pub fn joined(&self) -> String {
        self.segments.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn is_content_tag(node: &DomNode) -> bool {
    node.is_element() && CONTENT_TAGS.contains(&node.tag.as_str())
}

fn collect_segments(node: &DomNode, out: &mut Vec<String>) {
    if is_content_tag(node) {
        let mut buf = String::new();
        owned_text(node, &mut buf);
        out.push(buf);
    }
    for child in &node.children {
        collect_segments(child, out);
    }
}

/// Text under `node` that is not inside a nested content element.
fn owned_text(node: &DomNode, buf: &mut String) {
    for child in &node.children {
        match child.node_type {
            NodeType::Text => {
                let t = child.text.trim();
                if !t.is_empty() {
                    if !buf.is_empty() {
                        buf.push(' ');
                    }
                    buf.push_str(t);
                }
            }
            NodeType::Element if !is_content_tag(child) => owned_text(child, buf),
            _ => {}
        }
    }
}

/// Fragments between `.`, `!` and `?` that contain something besides whitespace.
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

fn rounded_div(num: usize, den: usize) -> usize {
    if den == 0 {
        0
    } else {
        (num as f64 / den as f64).round() as usize
    }
}

pub fn text_stats(content: &ContentText, root: &DomNode) -> TextStats {
    let mut total_chars = 0;
    let mut total_words = 0;
    let mut content_words = 0;
    for segment in &content.segments {
        total_chars += segment.chars().count();
        for word in segment.split_whitespace() {
            total_words += 1;
            if word.chars().any(char::is_alphabetic) {
                content_words += 1;
            }
        }
    }
    let sentences = content.sentence_count();

    // Structural counts are raw, unfiltered.
    let paragraphs = root.count_tag("p");
    let lists = root.count_tag("ul") + root.count_tag("ol");
    let tables = root.count_tag("table");

    TextStats {
        total_chars,
        total_words,
        content_words,
        sentences,
        paragraphs,
        lists,
        tables,
        reading_time_minutes: total_words.div_ceil(WORDS_PER_MINUTE),
        avg_sentence_length: rounded_div(total_words, sentences),
        avg_paragraph_length: rounded_div(total_words, paragraphs),
    }
}

/// Text statistics straight from a sanitized tree.
pub fn extract_text_stats(root: &DomNode) -> TextStats {
    text_stats(&ContentText::extract(root), root)
}
