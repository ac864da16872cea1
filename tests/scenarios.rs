use indoc::indoc;
use pretty_assertions::assert_eq;

use alice_seo::analysis::readability::{ReadabilityLevel, ReadabilityScorer};
use alice_seo::analysis::recommend::Priority;
use alice_seo::dom::filter::is_technical;
use alice_seo::dom::parser::parse_html;
use alice_seo::dom::sanitize::sanitize;
use alice_seo::{AuditEngine, ContentAnalysisResult, ContentAnalyzer};

fn analyze(html: &str) -> ContentAnalysisResult {
    ContentAnalyzer::default().analyze(&parse_html(html, "https://garden.example/roses"), "https://garden.example")
}

fn ids(result: &ContentAnalysisResult) -> Vec<&'static str> {
    result.recommendations.iter().map(|r| r.id).collect()
}

#[test]
fn code_fragment_is_filtered_and_prose_kept() {
    let first_sentence = "Function test() { return 1; }";
    assert!(is_technical(first_sentence));

    let tree = parse_html(
        "<html><body><p>Function test() { return 1; } This is real content about gardening and roses.</p></body></html>",
        "",
    );
    let clean = sanitize(&tree);
    let text = clean.body().text_content();
    assert_eq!(text, "This is real content about gardening and roses.");
    assert!(!is_technical(&text));
}

#[test]
fn empty_readability_is_exactly_zero() {
    let none: Vec<String> = Vec::new();
    let r = ReadabilityScorer::default().score(&none, 0);
    assert_eq!(r.score, 0);
    assert_eq!(r.level, ReadabilityLevel::Insufficient);
    assert_eq!(r.fog_index, 0.0);
    assert_eq!(r.avg_words_per_sentence, 0.0);
    assert_eq!(r.avg_chars_per_word, 0.0);
    assert_eq!(r.complex_words_percentage, 0.0);
    assert_eq!(r.total_sentences, 0);
    assert_eq!(r.total_words, 0);
}

#[test]
fn h1_with_three_h2_is_valid() {
    let result = analyze("<html><body><h1>Roses</h1><h2>Sun</h2><h2>Water</h2><h2>Soil</h2></body></html>");
    assert!(result.headings.has_h1);
    assert!(result.headings.valid_hierarchy);
    assert_eq!(result.headings.count(3), 0);
    assert!(!ids(&result).contains(&"content-heading-hierarchy"));
}

#[test]
fn twelve_images_two_with_alt() {
    let mut body = String::from("<img src=\"a.jpg\" alt=\"a\"><img src=\"b.jpg\" alt=\"b\">");
    for i in 0..10 {
        body.push_str(&format!("<img src=\"{i}.jpg\">"));
    }
    let result = analyze(&format!("<html><body>{body}</body></html>"));
    let rec = result.recommendations.iter().find(|r| r.id == "content-images-no-alt").unwrap();
    assert_eq!(rec.priority, Priority::Warning);
}

#[test]
fn zero_images_is_info() {
    let result = analyze("<html><body><p>Text.</p></body></html>");
    let rec = result.recommendations.iter().find(|r| r.id == "content-no-images").unwrap();
    assert_eq!(rec.priority, Priority::Info);
}

#[test]
fn recommendations_are_ranked() {
    let result = analyze("<html><body><h1>A</h1><h1>B</h1><h3>C</h3><p>Short.</p></body></html>");
    let order: Vec<(u8, u8)> = result
        .recommendations
        .iter()
        .map(|r| (r.priority.rank(), r.impact))
        .collect();
    let mut sorted = order.clone();
    sorted.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    assert_eq!(order, sorted);
    assert_eq!(result.recommendations[0].id, "content-thin");
    assert!(ids(&result).contains(&"content-multiple-h1"));
    assert!(ids(&result).contains(&"content-heading-hierarchy"));
}

const WELL_BUILT_PAGE: &str = indoc! {r#"
    <html lang="en">
    <head>
      <title>Growing Roses</title>
      <script type="application/ld+json">{"@context": "https://schema.org", "@type": "BreadcrumbList"}</script>
    </head>
    <body>
      <nav aria-label="Breadcrumb"><a href="/">Home</a> <a href="/guides">Guides</a></nav>
      <main>
        <article>
          <h1>Growing roses at home</h1>
          <h2>Sun and soil</h2>
          <p>PARAGRAPH</p>
          <p>PARAGRAPH</p>
          <p>PARAGRAPH</p>
          <h2>Water and food</h2>
          <p>PARAGRAPH</p>
          <p>PARAGRAPH</p>
          <p>PARAGRAPH</p>
          <img src="rose.jpg" alt="A red rose in bloom" loading="lazy">
        </article>
      </main>
      <div class="noindex">Buy cheap seeds now now now now now now now now</div>
      <script>window.dataLayer = [];</script>
    </body>
    </html>
"#};

#[test]
fn well_built_page_scores_high() {
    let paragraph = "Roses like a sunny spot with good soil. Water them deeply once a week. \
                     Feed them in spring and again in early summer. Cut off dead flowers \
                     so the plant keeps blooming. Check the leaves for pests on dry days. \
                     Mulch helps the roots stay cool and moist. Prune weak stems in late winter. \
                     Good air flow keeps the leaves healthy and green.";
    let html = WELL_BUILT_PAGE.replace("PARAGRAPH", paragraph);
    let audit = AuditEngine::default().process_html(&html, "https://garden.example/guides/roses");
    let c = &audit.content;

    assert_eq!(audit.title, "Growing Roses");
    assert!(c.text.content_words > 300, "content words: {}", c.text.content_words);
    assert_eq!(c.text.paragraphs, 6);
    assert!(c.readability.score > 60);
    assert!(c.breadcrumbs.present);
    assert_eq!(c.links.internal, 2);
    assert!(c.keywords.top_words.iter().all(|k| k.word != "cheap"));
    assert_eq!(c.score, 100);
    assert!(ids(c).contains(&"content-excellent"));
    assert!(!ids(c).contains(&"content-thin"));
    assert_eq!(c.recommendations.last().map(|r| r.id), Some("content-excellent"));
}

#[test]
fn result_serializes_to_json() {
    let result = analyze("<html><body><h1>Hi</h1><p>Some words here.</p></body></html>");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["readability"]["level"], "very-easy");
    assert_eq!(json["recommendations"][0]["priority"], "critical");
    assert!(json.get("sanitize_stats").is_none());
}
