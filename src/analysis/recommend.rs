//! Threshold rules turning metrics into ranked advice.
//!
//! Every rule looks at one or two metrics and contributes at most one
//! recommendation with a fixed id. Output order is priority (critical
//! first), then impact (highest first), then rule order.

use serde::Serialize;

use crate::analysis::headings::HeadingStats;
use crate::analysis::keywords::KeywordStats;
use crate::analysis::links::LinkReport;
use crate::analysis::media::{ImageReport, MultimediaReport};
use crate::analysis::readability::ReadabilityResult;
use crate::analysis::semantic::{BreadcrumbReport, SemanticReport};
use crate::analysis::text::TextStats;
use crate::config::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Warning,
    Info,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::Warning => 1,
            Priority::Info => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Headings,
    Images,
    Links,
    Text,
    Readability,
    Keywords,
    Multimedia,
    Semantics,
    Overall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub priority: Priority,
    /// 1–10.
    pub impact: u8,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// Everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub text: &'a TextStats,
    pub headings: &'a HeadingStats,
    pub images: &'a ImageReport,
    pub links: &'a LinkReport,
    pub readability: &'a ReadabilityResult,
    pub keywords: &'a KeywordStats,
    pub multimedia: &'a MultimediaReport,
    pub semantics: &'a SemanticReport,
    pub breadcrumbs: &'a BreadcrumbReport,
    pub score: u32,
}

struct Rules<'t> {
    thresholds: &'t Thresholds,
    out: Vec<Recommendation>,
}

impl Rules<'_> {
    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        id: &'static str,
        title: &str,
        description: String,
        suggestion: &str,
        priority: Priority,
        impact: u8,
        category: Category,
        examples: Option<Vec<String>>,
    ) {
        debug_assert!((1..=10).contains(&impact), "impact out of range for {id}");
        self.out.push(Recommendation {
            id,
            title: title.to_string(),
            description,
            suggestion: suggestion.to_string(),
            priority,
            impact,
            category,
            examples: examples.filter(|e| !e.is_empty()),
        });
    }

    fn headings(&mut self, s: &Signals<'_>) {
        let h1 = s.headings.count(1);
        if h1 == 0 {
            self.push(
                "content-no-h1",
                "Missing H1 heading",
                "The page has no H1 heading.".to_string(),
                "Add a single H1 that states the page topic.",
                Priority::Critical,
                9,
                Category::Headings,
                None,
            );
        } else if h1 > 1 {
            let titles = s.headings.level(1).map(|l| l.titles.iter().map(|t| t.text.clone()).collect());
            self.push(
                "content-multiple-h1",
                "Multiple H1 headings",
                format!("The page has {h1} H1 headings."),
                "Keep one H1 and demote the others to H2.",
                Priority::Warning,
                6,
                Category::Headings,
                titles,
            );
        }
        if !s.headings.valid_hierarchy {
            let order = s.headings.hierarchy.iter().map(|l| format!("h{l}")).collect::<Vec<_>>();
            self.push(
                "content-heading-hierarchy",
                "Heading levels are skipped",
                format!("Headings appear in the order {}, skipping a level.", order.join(" → ")),
                "Nest headings one level at a time (H1, then H2, then H3).",
                Priority::Warning,
                5,
                Category::Headings,
                Some(order),
            );
        }
        if s.headings.count(2) == 0 && s.text.content_words >= self.thresholds.min_content_words {
            self.push(
                "content-no-subheadings",
                "No subheadings",
                format!("{} words of content without a single H2.", s.text.content_words),
                "Break long content into sections with descriptive H2 headings.",
                Priority::Info,
                4,
                Category::Headings,
                None,
            );
        }
    }

    fn images(&mut self, s: &Signals<'_>) {
        let t = self.thresholds;
        if s.images.total == 0 {
            self.push(
                "content-no-images",
                "No images",
                "The page contains no images.".to_string(),
                "Add relevant images to illustrate the content.",
                Priority::Info,
                3,
                Category::Images,
                None,
            );
            return;
        }
        if s.images.alt_coverage < t.alt_coverage {
            self.push(
                "content-images-no-alt",
                "Images without ALT text",
                format!(
                    "Only {} of {} images ({:.0}%) have ALT text.",
                    s.images.with_alt, s.images.total, s.images.alt_coverage
                ),
                "Describe every meaningful image with a concise ALT attribute.",
                Priority::Warning,
                7,
                Category::Images,
                Some(s.images.missing_alt.clone()),
            );
        }
        if s.images.total > t.lazy_min_images && s.images.lazy_coverage < t.lazy_coverage {
            self.push(
                "content-images-lazy-loading",
                "Images are not lazy-loaded",
                format!(
                    "{} of {} images use lazy loading ({:.0}%).",
                    s.images.lazy, s.images.total, s.images.lazy_coverage
                ),
                "Add loading=\"lazy\" to images below the fold.",
                Priority::Info,
                4,
                Category::Images,
                None,
            );
        }
    }

    fn links(&mut self, s: &Signals<'_>) {
        let t = self.thresholds;
        if s.links.broken > 0 {
            self.push(
                "content-broken-links",
                "Links without text",
                format!("{} links have no readable text or label.", s.links.broken),
                "Give every link visible text, an aria-label, or an image with ALT text.",
                Priority::Warning,
                6,
                Category::Links,
                Some(s.links.broken_samples.clone()),
            );
        }
        if s.links.internal == 0 {
            self.push(
                "content-no-internal-links",
                "No internal links",
                "The page does not link to other pages on the same site.".to_string(),
                "Link to related pages to help readers and crawlers navigate.",
                Priority::Warning,
                5,
                Category::Links,
                None,
            );
        }
        if s.links.external > 0 && s.links.nofollow_percentage < t.external_nofollow_share {
            self.push(
                "content-external-nofollow",
                "External links without nofollow",
                format!(
                    "{} of {} external links carry rel=\"nofollow\".",
                    s.links.external_nofollow, s.links.external
                ),
                "Mark sponsored or untrusted external links with rel=\"nofollow\".",
                Priority::Info,
                3,
                Category::Links,
                None,
            );
        }
    }

    fn text(&mut self, s: &Signals<'_>) {
        let t = self.thresholds;
        if s.text.content_words < t.min_content_words {
            self.push(
                "content-thin",
                "Thin content",
                format!(
                    "The page has {} words of content; at least {} are recommended.",
                    s.text.content_words, t.min_content_words
                ),
                "Expand the main content with useful, original detail.",
                Priority::Critical,
                8,
                Category::Text,
                None,
            );
        }
        if s.text.paragraphs < t.min_paragraphs {
            self.push(
                "content-few-paragraphs",
                "Too few paragraphs",
                format!("The page has {} paragraphs.", s.text.paragraphs),
                "Split the text into short paragraphs that each cover one idea.",
                Priority::Warning,
                4,
                Category::Text,
                None,
            );
        }
    }

    fn readability(&mut self, s: &Signals<'_>) {
        let t = self.thresholds;
        if !s.readability.is_insufficient() && s.readability.score < t.min_readability_score {
            self.push(
                "content-readability",
                "Text is hard to read",
                format!(
                    "Readability score {} (fog index {:.1}): {}.",
                    s.readability.score, s.readability.fog_index, s.readability.interpretation
                ),
                "Use shorter sentences and simpler words.",
                Priority::Warning,
                6,
                Category::Readability,
                None,
            );
        }
        if s.text.avg_sentence_length > t.max_avg_sentence_length {
            self.push(
                "content-long-sentences",
                "Long sentences",
                format!("Sentences average {} words.", s.text.avg_sentence_length),
                "Aim for an average of 15–20 words per sentence.",
                Priority::Info,
                5,
                Category::Readability,
                None,
            );
        }
    }

    fn keywords(&mut self, s: &Signals<'_>) {
        let share = s.keywords.top_share();
        if share > self.thresholds.keyword_stuffing_share {
            let top = s.keywords.top_words.first().map(|k| k.word.clone()).unwrap_or_default();
            self.push(
                "content-keyword-stuffing",
                "Possible keyword stuffing",
                format!("\"{top}\" makes up {share:.1}% of the content words."),
                "Use synonyms and natural phrasing instead of repeating one keyword.",
                Priority::Warning,
                7,
                Category::Keywords,
                Some(vec![top]),
            );
        }
    }

    fn multimedia(&mut self, s: &Signals<'_>) {
        let uncaptioned = s.multimedia.videos - s.multimedia.videos_with_captions;
        if uncaptioned > 0 {
            self.push(
                "content-video-captions",
                "Videos without captions",
                format!("{uncaptioned} videos have no caption or subtitle track."),
                "Add a <track kind=\"captions\"> to every video.",
                Priority::Info,
                3,
                Category::Multimedia,
                None,
            );
        }
    }

    fn semantics(&mut self, s: &Signals<'_>) {
        if s.semantics.total == 0 {
            self.push(
                "content-no-semantic",
                "No semantic HTML",
                "The page uses no semantic elements such as <main>, <article> or <nav>.".to_string(),
                "Wrap page regions in semantic HTML5 elements.",
                Priority::Info,
                4,
                Category::Semantics,
                None,
            );
        }
        if !s.breadcrumbs.present {
            self.push(
                "content-no-breadcrumbs",
                "No breadcrumbs",
                "No breadcrumb navigation was found.".to_string(),
                "Add breadcrumbs with BreadcrumbList structured data.",
                Priority::Info,
                2,
                Category::Semantics,
                None,
            );
        }
    }

    fn overall(&mut self, s: &Signals<'_>) {
        if s.score >= self.thresholds.excellent_score {
            self.push(
                "content-excellent",
                "Excellent content quality",
                format!("The content scores {} out of 100.", s.score),
                "Keep the content up to date.",
                Priority::Info,
                1,
                Category::Overall,
                None,
            );
        }
    }
}

/// Orders by priority rank, then impact descending. The sort is stable, so
/// remaining ties keep rule order.
pub fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.impact.cmp(&a.impact))
    });
}

pub fn generate_recommendations(signals: &Signals<'_>, thresholds: &Thresholds) -> Vec<Recommendation> {
    let mut rules = Rules {
        thresholds,
        out: Vec::new(),
    };
    rules.headings(signals);
    rules.images(signals);
    rules.links(signals);
    rules.text(signals);
    rules.readability(signals);
    rules.keywords(signals);
    rules.multimedia(signals);
    rules.semantics(signals);
    rules.overall(signals);

    let mut out = rules.out;
    rank(&mut out);
    out
}
