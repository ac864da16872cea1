//! Vowel-group syllable estimation.
//!
//! No dictionary, no silent-e rules: a syllable starts wherever a vowel
//! follows a non-vowel. The vowel alphabet comes from the page's declared
//! `lang`, nothing is detected.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    English,
    French,
    Spanish,
    German,
    Italian,
    Portuguese,
    Other,
}

impl Language {
    /// Map a `lang` attribute (`en`, `fr-CA`, `pt_BR`, ...) to a language.
    /// A missing attribute is treated as English.
    pub fn from_lang_attr(lang: Option<&str>) -> Self {
        let Some(lang) = lang else {
            return Language::English;
        };
        let primary = lang
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" | "" => Language::English,
            "fr" => Language::French,
            "es" => Language::Spanish,
            "de" => Language::German,
            "it" => Language::Italian,
            "pt" => Language::Portuguese,
            _ => Language::Other,
        }
    }

    fn vowels(self) -> &'static str {
        match self {
            Language::English => "aeiouy",
            Language::French => "aeiouyàâæéèêëîïôœùûüÿ",
            Language::Spanish => "aeiouáéíóúü",
            Language::German => "aeiouyäöü",
            Language::Italian => "aeiouàèéìíîòóùú",
            Language::Portuguese => "aeiouáâãàéêíóôõú",
            Language::Other => "aeiouyàáâãäåæèéêëìíîïòóôõöøœùúûüÿ",
        }
    }

    /// Non-ASCII consonants that belong to the alphabet.
    fn extra_consonants(self) -> &'static str {
        match self {
            Language::English => "",
            Language::French | Language::Portuguese => "ç",
            Language::Spanish => "ñ",
            Language::German => "ß",
            Language::Italian => "",
            Language::Other => "çñß",
        }
    }

    pub fn is_vowel(self, c: char) -> bool {
        self.vowels().contains(c)
    }

    /// Whether `c` (already lowercased) survives word cleaning.
    pub fn is_letter(self, c: char) -> bool {
        c.is_ascii_lowercase() || self.is_vowel(c) || self.extra_consonants().contains(c)
    }
}

/// Lowercase `word` and keep only letters of the language's alphabet.
pub fn clean_word(word: &str, lang: Language) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(|&c| lang.is_letter(c))
        .collect()
}

/// Estimated syllable count; 0 only when nothing survives cleaning.
pub fn count_syllables(word: &str, lang: Language) -> usize {
    let cleaned = clean_word(word, lang);
    if cleaned.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for c in cleaned.chars() {
        let vowel = lang.is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    count.max(1)
}
