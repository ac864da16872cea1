//! Analysis thresholds.
//!
//! Every value defaults to the behaviour the analyzers are documented
//! with. A TOML file may override any subset:
//!
//! ```toml
//! [thresholds]
//! min_content_words = 500
//!
//! [[readability.fog_steps]]
//! max_fog = 6.0
//! score = 95
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub readability: ReadabilityConfig,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| AuditError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded analysis config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Metric cut-offs shared by the recommendation rules and the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_content_words: usize,
    pub min_paragraphs: usize,
    /// Percent of images with ALT text.
    pub alt_coverage: f64,
    /// Percent of images lazily loaded.
    pub lazy_coverage: f64,
    /// Lazy-loading advice only applies above this many images.
    pub lazy_min_images: usize,
    pub min_readability_score: u32,
    pub max_avg_sentence_length: usize,
    /// Percent of filtered words taken by the top keyword.
    pub keyword_stuffing_share: f64,
    /// Percent of external links carrying `rel=nofollow`.
    pub external_nofollow_share: f64,
    pub max_broken_link_percentage: f64,
    pub excellent_score: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_content_words: 300,
            min_paragraphs: 3,
            alt_coverage: 80.0,
            lazy_coverage: 50.0,
            lazy_min_images: 5,
            min_readability_score: 60,
            max_avg_sentence_length: 20,
            keyword_stuffing_share: 5.0,
            external_nofollow_share: 10.0,
            max_broken_link_percentage: 10.0,
            excellent_score: 80,
        }
    }
}

/// One row of the fog-index to score table: fog ≤ `max_fog` scores `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogStep {
    pub max_fog: f64,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    /// Ascending by `max_fog`.
    pub fog_steps: Vec<FogStep>,
    /// Score when the fog index exceeds every step.
    pub floor_score: u32,
    /// Syllable count at which a word is complex.
    pub complex_word_syllables: usize,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        let fog_steps = [(6.0, 95), (8.0, 85), (10.0, 75), (12.0, 65), (14.0, 55), (16.0, 45), (18.0, 35)]
            .into_iter()
            .map(|(max_fog, score)| FogStep { max_fog, score })
            .collect();
        Self {
            fog_steps,
            floor_score: 25,
            complex_word_syllables: 3,
        }
    }
}
