//! Gunning-Fog readability.
//!
//! `fog = 0.4 * (words/sentences + 100 * complex/words)` where a complex
//! word has three or more syllables. The fog index is mapped to a 0–100
//! score through a step table rather than a linear transform: the index is
//! a heuristic and the score should not pretend otherwise.

use serde::Serialize;

use crate::analysis::syllables::{count_syllables, Language};
use crate::config::ReadabilityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityLevel {
    VeryEasy,
    Easy,
    Moderate,
    Difficult,
    VeryDifficult,
    /// No words or no sentences to measure.
    Insufficient,
}

impl ReadabilityLevel {
    /// Derived from the score, never from the fog index.
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ReadabilityLevel::VeryEasy,
            60..=79 => ReadabilityLevel::Easy,
            40..=59 => ReadabilityLevel::Moderate,
            20..=39 => ReadabilityLevel::Difficult,
            _ => ReadabilityLevel::VeryDifficult,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityResult {
    pub score: u32,
    pub level: ReadabilityLevel,
    pub fog_index: f64,
    pub avg_words_per_sentence: f64,
    pub avg_chars_per_word: f64,
    /// 0–100.
    pub complex_words_percentage: f64,
    pub complex_words_count: usize,
    pub total_sentences: usize,
    pub total_words: usize,
    pub interpretation: String,
}

impl ReadabilityResult {
    pub fn insufficient() -> Self {
        Self {
            score: 0,
            level: ReadabilityLevel::Insufficient,
            fog_index: 0.0,
            avg_words_per_sentence: 0.0,
            avg_chars_per_word: 0.0,
            complex_words_percentage: 0.0,
            complex_words_count: 0,
            total_sentences: 0,
            total_words: 0,
            interpretation: "Not enough text to assess readability".to_string(),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.level == ReadabilityLevel::Insufficient
    }
}

/// Text description of a fog index; independent of the score ladder.
pub fn interpret_fog(fog: f64) -> &'static str {
    if fog <= 6.0 {
        "Very easy to read; suitable for a broad audience"
    } else if fog <= 8.0 {
        "Easy to read; conversational style"
    } else if fog <= 10.0 {
        "Fairly easy; plain language most readers follow"
    } else if fog <= 12.0 {
        "Standard; comfortable for high-school readers"
    } else if fog <= 14.0 {
        "Fairly difficult; aimed at college readers"
    } else if fog <= 17.0 {
        "Difficult; college-graduate level"
    } else {
        "Very difficult; specialist or academic prose"
    }
}

pub struct ReadabilityScorer {
    config: ReadabilityConfig,
    language: Language,
}

impl ReadabilityScorer {
    pub fn new(config: ReadabilityConfig, language: Language) -> Self {
        Self { config, language }
    }

    /// Step-table score for a fog index, clamped to 0–100. Steps are
    /// inclusive: fog exactly on a boundary gets that step's score.
    pub fn score_for_fog(&self, fog: f64) -> u32 {
        let score = self
            .config
            .fog_steps
            .iter()
            .find(|step| fog <= step.max_fog)
            .map_or(self.config.floor_score, |step| step.score);
        score.min(100)
    }

    pub fn score<S: AsRef<str>>(&self, words: &[S], sentence_count: usize) -> ReadabilityResult {
        if words.is_empty() || sentence_count == 0 {
            return ReadabilityResult::insufficient();
        }

        let total_words = words.len();
        let avg_words_per_sentence = total_words as f64 / sentence_count as f64;

        let mut total_chars = 0usize;
        let mut complex_words_count = 0usize;
        for word in words {
            let word = word.as_ref();
            total_chars += word.chars().count();
            if count_syllables(word, self.language) >= self.config.complex_word_syllables {
                complex_words_count += 1;
            }
        }

        let complex_ratio = complex_words_count as f64 / total_words as f64;
        let fog_index = 0.4 * (avg_words_per_sentence + 100.0 * complex_ratio);
        let score = self.score_for_fog(fog_index);

        log::debug!(
            "readability: {} words, {} sentences, fog {:.2} -> {}",
            total_words,
            sentence_count,
            fog_index,
            score
        );

        ReadabilityResult {
            score,
            level: ReadabilityLevel::from_score(score),
            fog_index,
            avg_words_per_sentence,
            avg_chars_per_word: total_chars as f64 / total_words as f64,
            complex_words_percentage: complex_ratio * 100.0,
            complex_words_count,
            total_sentences: sentence_count,
            total_words,
            interpretation: interpret_fog(fog_index).to_string(),
        }
    }
}

impl Default for ReadabilityScorer {
    fn default() -> Self {
        Self::new(ReadabilityConfig::default(), Language::English)
    }
}
