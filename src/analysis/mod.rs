//! Content quality and readability analysis.
//!
//! sanitize → extract metrics → score → recommend, strictly in that order.
//! Each call works on its own sanitized copy and keeps nothing between
//! calls, so analyzers can be shared across threads.

pub mod headings;
pub mod keywords;
pub mod links;
pub mod media;
pub mod readability;
pub mod recommend;
pub mod score;
pub mod semantic;
pub mod syllables;
pub mod text;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::dom::sanitize::{DocumentSanitizer, SanitizeStats};
use crate::dom::DomTree;

use headings::{extract_heading_stats, HeadingStats};
use keywords::{mine_keywords, KeywordStats};
use links::{analyze_links, LinkReport, PageOrigin};
use media::{analyze_images, analyze_multimedia, ImageReport, MultimediaReport};
use readability::{ReadabilityResult, ReadabilityScorer};
use recommend::{generate_recommendations, Recommendation, Signals};
use score::aggregate_score;
use semantic::{analyze_semantics, detect_breadcrumbs, BreadcrumbReport, SemanticReport};
use syllables::Language;
use text::{text_stats, ContentText, TextStats};

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysisResult {
    pub language: Language,
    pub text: TextStats,
    pub headings: HeadingStats,
    pub readability: ReadabilityResult,
    pub keywords: KeywordStats,
    pub images: ImageReport,
    pub links: LinkReport,
    pub multimedia: MultimediaReport,
    pub semantics: SemanticReport,
    pub breadcrumbs: BreadcrumbReport,
    /// 0–100.
    pub score: u32,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip)]
    pub sanitize_stats: SanitizeStats,
}

pub struct ContentAnalyzer {
    config: AnalysisConfig,
    sanitizer: DocumentSanitizer,
}

impl ContentAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            sanitizer: DocumentSanitizer::new(),
        }
    }

    /// Analyze `tree` against the page origin (`scheme://host[:port]`).
    /// The tree is not modified.
    pub fn analyze(&self, tree: &DomTree, origin: &str) -> ContentAnalysisResult {
        let (clean, sanitize_stats) = self.sanitizer.sanitize(tree);
        let root = &clean.root;

        let content = ContentText::extract(root);
        let text = text_stats(&content, root);
        let headings = extract_heading_stats(root);

        let language = Language::from_lang_attr(tree.lang.as_deref());
        let scorer = ReadabilityScorer::new(self.config.readability.clone(), language);
        let readability = scorer.score(&content.words(), text.sentences);

        let keywords = mine_keywords(&content.joined());
        let images = analyze_images(root);
        let links = analyze_links(root, &PageOrigin::parse(origin));
        let multimedia = analyze_multimedia(root);
        let semantics = analyze_semantics(root);
        let breadcrumbs = detect_breadcrumbs(root, &tree.root);

        let thresholds = &self.config.thresholds;
        let score = aggregate_score(&images, &text, &headings, &links, &readability, thresholds);
        debug_assert!(score <= 100);

        let recommendations = generate_recommendations(
            &Signals {
                text: &text,
                headings: &headings,
                images: &images,
                links: &links,
                readability: &readability,
                keywords: &keywords,
                multimedia: &multimedia,
                semantics: &semantics,
                breadcrumbs: &breadcrumbs,
                score,
            },
            thresholds,
        );

        log::info!(
            "analyzed {}: {} words, score {}, {} recommendations",
            if tree.url.is_empty() { "<inline>" } else { tree.url.as_str() },
            text.total_words,
            score,
            recommendations.len()
        );

        ContentAnalysisResult {
            language,
            text,
            headings,
            readability,
            keywords,
            images,
            links,
            multimedia,
            semantics,
            breadcrumbs,
            score,
            recommendations,
            sanitize_stats,
        }
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;
    use recommend::Priority;

    fn ids(result: &ContentAnalysisResult) -> Vec<&'static str> {
        result.recommendations.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_document_is_degenerate_not_an_error() {
        let tree = parse_html("", "");
        let result = ContentAnalyzer::default().analyze(&tree, "");
        assert_eq!(result.text.total_words, 0);
        assert!(result.readability.is_insufficient());
        assert!(result.score <= 100);
        assert!(ids(&result).contains(&"content-no-h1"));
        assert!(ids(&result).contains(&"content-no-images"));
    }

    #[test]
    fn original_tree_is_untouched() {
        let tree = parse_html(
            "<html><body><p>Hi</p><script>var a = 1;</script><div class=\"noindex\">x</div></body></html>",
            "https://example.com/",
        );
        let before = tree.clone();
        let result = ContentAnalyzer::default().analyze(&tree, "https://example.com");
        assert_eq!(tree, before);
        assert_eq!(result.sanitize_stats.excluded_regions, 1);
        assert_eq!(result.sanitize_stats.technical.removed_elements, 1);
    }

    #[test]
    fn images_without_alt_are_flagged() {
        let imgs: String = (0..12)
            .map(|i| {
                if i < 2 {
                    format!("<img src=\"{i}.jpg\" alt=\"photo {i}\">")
                } else {
                    format!("<img src=\"{i}.jpg\">")
                }
            })
            .collect();
        let tree = parse_html(&format!("<html><body>{imgs}</body></html>"), "");
        let result = ContentAnalyzer::default().analyze(&tree, "");
        let rec = result
            .recommendations
            .iter()
            .find(|r| r.id == "content-images-no-alt")
            .expect("alt recommendation");
        assert_eq!(rec.priority, Priority::Warning);
        assert_eq!(rec.examples.as_ref().map(Vec::len), Some(5));
        assert!(ids(&result).contains(&"content-images-lazy-loading"));
        assert!(!ids(&result).contains(&"content-no-images"));
    }

    #[test]
    fn no_images_is_info() {
        let tree = parse_html("<html><body><p>Words only.</p></body></html>", "");
        let result = ContentAnalyzer::default().analyze(&tree, "");
        let rec = result
            .recommendations
            .iter()
            .find(|r| r.id == "content-no-images")
            .expect("no-images recommendation");
        assert_eq!(rec.priority, Priority::Info);
    }

    #[test]
    fn script_in_article_does_not_reach_metrics() {
        let tree = parse_html(
            "<html><body><article><p>Roses need sun.</p><script>window.dataLayer = window.dataLayer || []; \
             function gtag(){dataLayer.push(arguments);} gtag('js', new Date()); gtag('config', 'UA-12345');\
             </script></article></body></html>",
            "",
        );
        let result = ContentAnalyzer::default().analyze(&tree, "");
        assert_eq!(result.text.total_words, 3);
        let words: Vec<&str> = result.keywords.top_words.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["roses", "need"]);
    }

    #[test]
    fn lang_attribute_selects_language() {
        let tree = parse_html("<html lang=\"fr\"><body><p>Été.</p></body></html>", "");
        assert_eq!(ContentAnalyzer::default().analyze(&tree, "").language, Language::French);
    }
}
