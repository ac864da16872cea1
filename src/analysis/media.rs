use serde::Serialize;

use crate::dom::DomNode;

const SAMPLE_LIMIT: usize = 5;
const VIDEO_EMBED_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com", "youtu.be", "vimeo.com", "dailymotion.com"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageReport {
    pub total: usize,
    pub with_alt: usize,
    pub lazy: usize,
    /// Percent, 0 when there are no images.
    pub alt_coverage: f64,
    pub lazy_coverage: f64,
    /// Up to five `src` values of images missing ALT text.
    pub missing_alt: Vec<String>,
}

fn has_alt(img: &DomNode) -> bool {
    img.attr("alt").is_some_and(|alt| !alt.trim().is_empty())
}

fn is_lazy(img: &DomNode) -> bool {
    img.attr("loading").is_some_and(|l| l.eq_ignore_ascii_case("lazy")) || img.attributes.has("data-src")
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

pub fn analyze_images(root: &DomNode) -> ImageReport {
    let images = root.find_all("img");
    let mut report = ImageReport {
        total: images.len(),
        ..Default::default()
    };

    for img in images {
        if has_alt(img) {
            report.with_alt += 1;
        } else if report.missing_alt.len() < SAMPLE_LIMIT {
            let src = img.attr("src").or_else(|| img.attr("data-src")).unwrap_or("(no src)");
            report.missing_alt.push(src.to_string());
        }
        if is_lazy(img) {
            report.lazy += 1;
        }
    }

    report.alt_coverage = percent(report.with_alt, report.total);
    report.lazy_coverage = percent(report.lazy, report.total);
    report
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultimediaReport {
    pub videos: usize,
    pub videos_with_captions: usize,
    pub audio: usize,
    pub iframes: usize,
    /// Iframes pointing at known video hosts.
    pub video_embeds: usize,
}

impl MultimediaReport {
    pub fn total(&self) -> usize {
        self.videos + self.audio + self.video_embeds
    }
}

fn has_captions(video: &DomNode) -> bool {
    video.children.iter().any(|c| {
        c.tag == "track"
            && c
                .attr("kind")
                .is_some_and(|k| k.eq_ignore_ascii_case("captions") || k.eq_ignore_ascii_case("subtitles"))
    })
}

pub fn analyze_multimedia(root: &DomNode) -> MultimediaReport {
    let videos = root.find_all("video");
    let iframes = root.find_all("iframe");
    MultimediaReport {
        videos: videos.len(),
        videos_with_captions: videos.iter().filter(|v| has_captions(v)).count(),
        audio: root.count_tag("audio"),
        iframes: iframes.len(),
        video_embeds: iframes
            .iter()
            .filter(|f| {
                f.attr("src")
                    .map(str::to_ascii_lowercase)
                    .is_some_and(|src| VIDEO_EMBED_HOSTS.iter().any(|h| src.contains(h)))
            })
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    fn body(html: &str) -> DomNode {
        parse_html(&format!("<html><body>{html}</body></html>"), "").root
    }

    #[test]
    fn alt_and_lazy_coverage() {
        let root = body(
            r#"<img src="a.jpg" alt="A rose" loading="lazy">
               <img src="b.jpg" alt="  ">
               <img src="c.jpg">
               <img data-src="d.jpg" alt="Tulip">"#,
        );
        let report = analyze_images(&root);
        assert_eq!(report.total, 4);
        assert_eq!(report.with_alt, 2);
        assert_eq!(report.lazy, 2);
        assert_eq!(report.alt_coverage, 50.0);
        assert_eq!(report.missing_alt, vec!["b.jpg", "c.jpg"]);
    }

    #[test]
    fn no_images_means_zero_coverage() {
        let report = analyze_images(&body("<p>Text only</p>"));
        assert_eq!(report, ImageReport::default());
    }

    #[test]
    fn multimedia_counts() {
        let root = body(
            r#"<video><track kind="captions" src="en.vtt"></video>
               <video></video>
               <audio src="x.mp3"></audio>
               <iframe src="https://www.YouTube.com/embed/abc"></iframe>
               <iframe src="https://maps.example.com"></iframe>"#,
        );
        let report = analyze_multimedia(&root);
        assert_eq!(report.videos, 2);
        assert_eq!(report.videos_with_captions, 1);
        assert_eq!(report.audio, 1);
        assert_eq!(report.iframes, 2);
        assert_eq!(report.video_embeds, 1);
        assert_eq!(report.total(), 4);
    }
}
