use serde::Serialize;
use url::Url;

use crate::dom::DomNode;

const SAMPLE_LIMIT: usize = 5;

/// Where an `href` points, relative to the page origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
    /// Fragment-only (`#section`).
    Anchor,
    /// `mailto:`, `tel:`, `javascript:` and other non-navigational schemes.
    Special,
    Invalid,
}

/// The page origin links are classified against. A page without a usable
/// origin treats every absolute http(s) link as external and resolves
/// nothing relative.
#[derive(Debug, Clone)]
pub struct PageOrigin {
    base: Option<Url>,
}

impl PageOrigin {
    pub fn parse(origin: &str) -> Self {
        let base = match Url::parse(origin) {
            Ok(url) if url.has_host() => Some(url),
            Ok(_) => None,
            Err(e) => {
                if !origin.is_empty() {
                    log::warn!("unusable page origin {origin:?}: {e}");
                }
                None
            }
        };
        Self { base }
    }

    pub fn classify(&self, href: &str) -> LinkKind {
        let href = href.trim();
        if href.starts_with('#') {
            return LinkKind::Anchor;
        }
        let resolved = match &self.base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        match resolved {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => LinkKind::Special,
            Ok(url) => match &self.base {
                Some(base) if url.origin() == base.origin() => LinkKind::Internal,
                _ => LinkKind::External,
            },
            // Relative hrefs without a base are still same-site.
            Err(url::ParseError::RelativeUrlWithoutBase) => LinkKind::Internal,
            Err(_) => LinkKind::Invalid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkReport {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub anchors: usize,
    pub special: usize,
    pub invalid: usize,
    pub external_nofollow: usize,
    /// Links with no accessible text.
    pub broken: usize,
    pub broken_percentage: f64,
    /// Percent of external links marked nofollow.
    pub nofollow_percentage: f64,
    pub broken_samples: Vec<String>,
}

fn is_nofollow(link: &DomNode) -> bool {
    link.attr("rel")
        .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("nofollow")))
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// A link nobody can read: no text, no label, no described image.
fn is_broken(link: &DomNode) -> bool {
    if !link.text_content().trim().is_empty() {
        return false;
    }
    if non_blank(link.attr("aria-label")) || non_blank(link.attr("title")) {
        return false;
    }
    !link.find_all("img").iter().any(|img| non_blank(img.attr("alt")))
}

pub fn analyze_links(root: &DomNode, origin: &PageOrigin) -> LinkReport {
    let mut report = LinkReport::default();

    root.walk_elements(&mut |node| {
        if node.tag != "a" {
            return;
        }
        let Some(href) = node.attr("href") else {
            return;
        };
        report.total += 1;
        match origin.classify(href) {
            LinkKind::Internal => report.internal += 1,
            LinkKind::External => {
                report.external += 1;
                if is_nofollow(node) {
                    report.external_nofollow += 1;
                }
            }
            LinkKind::Anchor => report.anchors += 1,
            LinkKind::Special => report.special += 1,
            LinkKind::Invalid => report.invalid += 1,
        }
        if is_broken(node) {
            report.broken += 1;
            if report.broken_samples.len() < SAMPLE_LIMIT {
                report.broken_samples.push(href.to_string());
            }
        }
    });

    if report.total > 0 {
        report.broken_percentage = report.broken as f64 * 100.0 / report.total as f64;
    }
    if report.external > 0 {
        report.nofollow_percentage = report.external_nofollow as f64 * 100.0 / report.external as f64;
    }
    report
}
