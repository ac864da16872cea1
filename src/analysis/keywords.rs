use std::collections::HashMap;

use serde::Serialize;

/// Language keywords and DOM API names that leak into page text but are
/// never editorial keywords. Only entries longer than three characters
/// matter; shorter tokens are dropped anyway.
const TECHNICAL_VOCABULARY: &[&str] = &[
    "function", "return", "const", "document", "window", "null", "undefined", "true", "false",
    "typeof", "instanceof", "class", "import", "export", "default", "async", "await", "console",
    "script", "style", "else", "while", "switch", "break", "continue", "catch", "finally",
    "throw", "prototype", "queryselector", "queryselectorall", "getelementbyid",
    "addeventlistener", "innerhtml", "textcontent", "onclick", "onload", "length", "push",
    "json", "http", "https", "href", "span", "void", "this",
];

const TOP_WORDS: usize = 10;
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordStats {
    pub top_words: Vec<KeywordCount>,
    pub unique_words: usize,
    /// Words that survived filtering.
    pub total_words: usize,
    /// Whether the technical vocabulary removed anything.
    pub filtered: bool,
}

impl KeywordStats {
    /// Percentage of filtered words taken by the most frequent keyword.
    pub fn top_share(&self) -> f64 {
        match self.top_words.first() {
            Some(top) if self.total_words > 0 => top.count as f64 * 100.0 / self.total_words as f64,
            _ => 0.0,
        }
    }
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

pub fn mine_keywords(text: &str) -> KeywordStats {
    // Frequency table kept in first-encountered order for stable ties.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<KeywordCount> = Vec::new();
    let mut total_words = 0;
    let mut filtered = false;

    for token in text.split_whitespace() {
        let word = normalize(token);
        if word.chars().count() < MIN_WORD_CHARS {
            continue;
        }
        if TECHNICAL_VOCABULARY.contains(&word.as_str()) {
            filtered = true;
            continue;
        }
        total_words += 1;
        match index.get(&word) {
            Some(&i) => table[i].count += 1,
            None => {
                index.insert(word.clone(), table.len());
                table.push(KeywordCount { word, count: 1 });
            }
        }
    }

    let unique_words = table.len();
    // Stable sort keeps first-encountered order among equal counts.
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(TOP_WORDS);

    KeywordStats {
        top_words: table,
        unique_words,
        total_words,
        filtered,
    }
}
