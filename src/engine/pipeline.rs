use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use url::Url;

use crate::analysis::{ContentAnalysisResult, ContentAnalyzer};
use crate::config::AnalysisConfig;
use crate::dom::parser::parse_html;
use crate::error::AuditError;
use crate::net::fetch::fetch_url;

/// Where a page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Url(String),
    File(PathBuf),
}

impl PageSource {
    /// `http(s)://` inputs are URLs, everything else a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            PageSource::Url(arg.to_string())
        } else {
            PageSource::File(PathBuf::from(arg))
        }
    }

    pub fn label(&self) -> String {
        match self {
            PageSource::Url(u) => u.clone(),
            PageSource::File(p) => p.display().to_string(),
        }
    }
}

/// Result of auditing one page
#[derive(Debug, Clone, Serialize)]
pub struct PageAudit {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_status: Option<u16>,
    pub content: ContentAnalysisResult,
}

/// One entry of a batch run; failures are reported, never fatal.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub source: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOutcome {
    Audit(Box<PageAudit>),
    Error(String),
}

/// Origin (`scheme://host[:port]`) of a page URL, if it has one.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// The audit pipeline: Fetch/Read → Parse → Sanitize → Analyze
pub struct AuditEngine {
    analyzer: ContentAnalyzer,
    /// Overrides the origin derived from each page URL.
    origin: Option<String>,
}

impl AuditEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            analyzer: ContentAnalyzer::new(config),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Fetch a URL and audit it
    pub fn load_page(&self, url: &str) -> Result<PageAudit, AuditError> {
        let fetched = fetch_url(url)?;
        let mut audit = self.process_html(&fetched.html, &fetched.url);
        audit.fetch_status = Some(fetched.status);
        Ok(audit)
    }

    /// Read an HTML file from disk and audit it
    pub fn load_file(&self, path: &std::path::Path) -> Result<PageAudit, AuditError> {
        let html = std::fs::read_to_string(path).map_err(|source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.process_html(&html, ""))
    }

    /// Audit raw HTML. `url` may be empty for local documents.
    pub fn process_html(&self, html: &str, url: &str) -> PageAudit {
        let tree = parse_html(html, url);
        let origin = self
            .origin
            .clone()
            .or_else(|| origin_of(url))
            .unwrap_or_default();

        let content = self.analyzer.analyze(&tree, &origin);

        PageAudit {
            url: tree.url,
            title: tree.title,
            fetch_status: None,
            content,
        }
    }

    pub fn audit(&self, source: &PageSource) -> Result<PageAudit, AuditError> {
        match source {
            PageSource::Url(url) => self.load_page(url),
            PageSource::File(path) => self.load_file(path),
        }
    }

    /// Audit every source in parallel. Analyses share nothing, so order of
    /// completion is irrelevant; output order follows input order.
    pub fn audit_batch(&self, sources: &[PageSource]) -> Vec<BatchEntry> {
        sources
            .par_iter()
            .map(|source| {
                let outcome = match self.audit(source) {
                    Ok(audit) => BatchOutcome::Audit(Box::new(audit)),
                    Err(e) => {
                        log::error!("{}", e);
                        BatchOutcome::Error(e.to_string())
                    }
                };
                BatchEntry {
                    source: source.label(),
                    outcome,
                }
            })
            .collect()
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
