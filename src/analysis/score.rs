//! Composite content score.
//!
//! Fixed point budget per category, every predicate all-or-nothing:
//!
//! | bucket      | max | points                                          |
//! |-------------|-----|-------------------------------------------------|
//! | images      | 20  | 15 ALT coverage, 5 lazy coverage                |
//! | text        | 30  | 20 content words, 10 paragraphs                 |
//! | headings    | 20  | 5 single H1, 5 any H2, 10 valid hierarchy       |
//! | links       | 15  | 10 few broken links, 5 any internal link        |
//! | readability | 15  | 15 readability score                            |

use crate::analysis::headings::HeadingStats;
use crate::analysis::links::LinkReport;
use crate::analysis::media::ImageReport;
use crate::analysis::readability::ReadabilityResult;
use crate::analysis::text::TextStats;
use crate::config::Thresholds;

const MAX_SCORE: u32 = 100;

fn points(condition: bool, value: u32) -> u32 {
    if condition {
        value
    } else {
        0
    }
}

pub fn aggregate_score(
    images: &ImageReport,
    text: &TextStats,
    headings: &HeadingStats,
    links: &LinkReport,
    readability: &ReadabilityResult,
    thresholds: &Thresholds,
) -> u32 {
    let image_points = (points(images.alt_coverage > thresholds.alt_coverage, 15)
        + points(images.lazy_coverage > thresholds.lazy_coverage, 5))
    .min(20);

    let text_points = (points(text.content_words > thresholds.min_content_words, 20)
        + points(text.paragraphs > thresholds.min_paragraphs, 10))
    .min(30);

    let heading_points = (points(headings.count(1) == 1, 5)
        + points(headings.count(2) > 0, 5)
        + points(headings.valid_hierarchy, 10))
    .min(20);

    let link_points = (points(links.broken_percentage < thresholds.max_broken_link_percentage, 10)
        + points(links.internal > 0, 5))
    .min(15);

    let readability_points = points(readability.score > thresholds.min_readability_score, 15).min(15);

    let total = image_points + text_points + heading_points + link_points + readability_points;
    log::debug!(
        "content score: images {image_points}, text {text_points}, headings {heading_points}, links {link_points}, readability {readability_points}"
    );
    total.min(MAX_SCORE)
}
