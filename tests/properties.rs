use proptest::prelude::*;

use alice_seo::analysis::headings::{extract_heading_stats, HeadingStats};
use alice_seo::analysis::links::LinkReport;
use alice_seo::analysis::media::ImageReport;
use alice_seo::analysis::readability::{ReadabilityResult, ReadabilityScorer};
use alice_seo::analysis::score::aggregate_score;
use alice_seo::analysis::text::TextStats;
use alice_seo::config::Thresholds;
use alice_seo::dom::filter::is_technical;
use alice_seo::dom::parser::parse_html;
use alice_seo::dom::sanitize::{sanitize, DocumentSanitizer, SanitizeStats};
use alice_seo::dom::NodeType;
use alice_seo::ContentAnalyzer;

const FRAGMENTS: &[&str] = &[
    "<p>Roses need full sun and regular water.</p>",
    "<p>Function test() { return 1; } This is real content about gardening and roses.</p>",
    "<p>Mulch keeps roots cool.\nconst total = 3;\nFeed monthly in summer.</p>",
    "<script>var tracker = window.location;</script>",
    "<style>.hero { color: red; }</style>",
    "<div class=\"noindex\">Hidden promo text</div>",
    "<!-- noindex --><p>Comment-hidden</p><!-- /noindex -->",
    "<article><pre>Install first.\nlet x = require('y');</pre><p>Hello ${name} friend.</p></article>",
    "<ul><li>Prune in spring</li><li>onclick=\"go()\" Water</li></ul>",
    "<h2>Soil</h2>",
    "<img src=\"rose.jpg\" alt=\"A red rose\">",
    "<a href=\"/care\">Care guide</a>",
];

fn page(parts: &[&str]) -> String {
    format!("<html><body>{}</body></html>", parts.concat())
}

fn heading_page(levels: &[u8]) -> HeadingStats {
    let body: String = levels.iter().map(|l| format!("<h{l}>Heading</h{l}>")).collect();
    extract_heading_stats(&parse_html(&format!("<html><body>{body}</body></html>"), "").root)
}

/// Reference check over the raw sequence: a level seen for the first time
/// may be at most one deeper than the previously first-seen level.
fn reference_valid(levels: &[u8]) -> bool {
    let mut seen: Vec<u8> = Vec::new();
    for &l in levels {
        if seen.contains(&l) {
            continue;
        }
        if let Some(&prev) = seen.last() {
            if l > prev + 1 {
                return false;
            }
        }
        seen.push(l);
    }
    true
}

proptest! {
    #[test]
    fn readability_score_is_bounded_step_function(a in 0.0f64..40.0, b in 0.0f64..40.0) {
        let scorer = ReadabilityScorer::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (s_lo, s_hi) = (scorer.score_for_fog(lo), scorer.score_for_fog(hi));
        prop_assert!(s_lo <= 100 && s_hi <= 100);
        prop_assert!(s_lo >= s_hi);
    }

    #[test]
    fn readability_result_is_bounded(words in prop::collection::vec("[a-z]{1,14}", 1..200), sentences in 1usize..40) {
        let result = ReadabilityScorer::default().score(&words, sentences);
        prop_assert!(result.score <= 100);
        prop_assert!(result.fog_index.is_finite());
        prop_assert!((0.0..=100.0).contains(&result.complex_words_percentage));
    }

    #[test]
    fn heading_hierarchy_matches_reference(levels in prop::collection::vec(1u8..=6, 0..12)) {
        let stats = heading_page(&levels);
        prop_assert_eq!(stats.valid_hierarchy, reference_valid(&levels));
        prop_assert_eq!(stats.total(), levels.len());
    }

    #[test]
    fn aggregate_is_bounded_and_monotonic(flags in prop::array::uniform9(any::<bool>()), flip in 0usize..9) {
        let score_of = |f: &[bool; 9]| {
            let images = ImageReport {
                alt_coverage: if f[0] { 100.0 } else { 0.0 },
                lazy_coverage: if f[1] { 100.0 } else { 0.0 },
                ..Default::default()
            };
            let text = TextStats {
                content_words: if f[2] { 1000 } else { 0 },
                paragraphs: if f[3] { 10 } else { 0 },
                ..Default::default()
            };
            let mut body = String::new();
            if f[4] { body.push_str("<h1>T</h1>"); }
            if f[5] { body.push_str("<h2>S</h2>"); }
            let mut headings = extract_heading_stats(&parse_html(&format!("<html><body>{body}</body></html>"), "").root);
            headings.valid_hierarchy = f[6];
            let links = LinkReport {
                broken_percentage: if f[7] { 0.0 } else { 50.0 },
                internal: usize::from(f[8]),
                ..Default::default()
            };
            let mut readability = ReadabilityResult::insufficient();
            readability.score = 95;
            aggregate_score(&images, &text, &headings, &links, &readability, &Thresholds::default())
        };
        let mut off = flags;
        off[flip] = false;
        let mut on = flags;
        on[flip] = true;
        let (s_off, s_on) = (score_of(&off), score_of(&on));
        prop_assert!(s_on <= 100);
        prop_assert!(s_on >= s_off);
    }

    #[test]
    fn sanitize_is_idempotent(picks in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10)) {
        let tree = parse_html(&page(&picks), "");
        let once = sanitize(&tree);
        let (twice, stats) = DocumentSanitizer::new().sanitize(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(stats, SanitizeStats::default());
    }

    #[test]
    fn sanitized_text_nodes_never_match(picks in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10)) {
        let clean = sanitize(&parse_html(&page(&picks), ""));
        let mut leaked = Vec::new();
        clean.root.walk_elements(&mut |node| {
            for child in &node.children {
                if child.node_type == NodeType::Text && is_technical(&child.text) {
                    leaked.push(child.text.clone());
                }
            }
        });
        prop_assert!(leaked.is_empty(), "technical text survived: {:?}", leaked);
    }

    #[test]
    fn analysis_is_deterministic(picks in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10)) {
        let tree = parse_html(&page(&picks), "https://garden.example/");
        let analyzer = ContentAnalyzer::default();
        let first = analyzer.analyze(&tree, "https://garden.example");
        let second = analyzer.analyze(&tree, "https://garden.example");
        prop_assert_eq!(&first.recommendations, &second.recommendations);
        prop_assert_eq!(first, second);
    }
}
