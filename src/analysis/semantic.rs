use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::{DomNode, NodeType};

pub const SEMANTIC_TAGS: &[&str] = &[
    "article", "section", "nav", "header", "footer", "main", "aside", "figure", "time", "mark",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SemanticReport {
    /// Count per semantic tag, zero counts omitted.
    pub elements: BTreeMap<String, usize>,
    pub total: usize,
}

impl SemanticReport {
    pub fn count(&self, tag: &str) -> usize {
        self.elements.get(tag).copied().unwrap_or(0)
    }
}

pub fn analyze_semantics(root: &DomNode) -> SemanticReport {
    let mut report = SemanticReport::default();
    root.walk_elements(&mut |node| {
        if SEMANTIC_TAGS.contains(&node.tag.as_str()) {
            *report.elements.entry(node.tag.clone()).or_insert(0) += 1;
            report.total += 1;
        }
    });
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreadcrumbSource {
    /// `aria-label`, class or id mentioning "breadcrumb".
    Markup,
    Microdata,
    JsonLd,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreadcrumbReport {
    pub present: bool,
    pub sources: Vec<BreadcrumbSource>,
}

fn mentions_breadcrumb(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.to_ascii_lowercase().contains("breadcrumb"))
}

fn is_json_ld(node: &DomNode) -> bool {
    node.tag == "script"
        && node
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
}

/// Breadcrumb detection. Markup and microdata are read from the sanitized
/// tree so excluded regions do not count; JSON-LD lives in `<script>`
/// elements, which sanitization removes, so it is read from `raw`.
pub fn detect_breadcrumbs(clean: &DomNode, raw: &DomNode) -> BreadcrumbReport {
    let mut sources = Vec::new();

    clean.walk_elements(&mut |node| {
        if !sources.contains(&BreadcrumbSource::Markup)
            && (mentions_breadcrumb(node.attr("aria-label"))
                || mentions_breadcrumb(node.attr("class"))
                || mentions_breadcrumb(node.attr("id")))
        {
            sources.push(BreadcrumbSource::Markup);
        }
        if !sources.contains(&BreadcrumbSource::Microdata)
            && node.attr("itemtype").is_some_and(|t| t.contains("BreadcrumbList"))
        {
            sources.push(BreadcrumbSource::Microdata);
        }
    });

    let json_ld = raw.find_all("script").into_iter().any(|node| {
        is_json_ld(node)
            && node
                .children
                .iter()
                .any(|c| c.node_type == NodeType::Text && c.text.contains("BreadcrumbList"))
    });
    if json_ld {
        sources.push(BreadcrumbSource::JsonLd);
    }

    BreadcrumbReport {
        present: !sources.is_empty(),
        sources,
    }
}
