//! Per-language stop-word sets.
//!
//! Curated lists of high-frequency function words excluded from salience
//! consideration. The English list follows the NLTK stopword corpus; because
//! the tokenizer strips apostrophes, contractions appear here as their bare
//! fragments ("don", "t", "ve", ...).

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Language whose stop-word corpus is applied during filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// English (default).
    #[default]
    English,
    /// French.
    French,
    /// German.
    German,
    /// Spanish.
    Spanish,
}

impl Language {
    /// Returns the language name as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::French => "french",
            Self::German => "german",
            Self::Spanish => "spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stop-word set for a language.
pub fn for_language(language: Language) -> &'static HashSet<&'static str> {
    match language {
        Language::English => &ENGLISH,
        Language::French => &FRENCH,
        Language::German => &GERMAN,
        Language::Spanish => &SPANISH,
    }
}

static ENGLISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
        "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
        "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
        "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    ]
    .into_iter()
    .collect()
});

static FRENCH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "au", "aux", "avec", "ce", "ces", "cette", "dans", "de", "des", "du", "elle", "elles",
        "en", "et", "eux", "il", "ils", "je", "la", "le", "les", "leur", "leurs", "lui", "ma",
        "mais", "me", "même", "mes", "moi", "mon", "ne", "nos", "notre", "nous", "on", "ou", "où",
        "par", "pas", "pour", "qu", "que", "qui", "sa", "se", "ses", "son", "sur", "ta", "te",
        "tes", "toi", "ton", "tu", "un", "une", "vos", "votre", "vous", "été", "être", "avoir",
        "fait", "faire", "plus", "tout", "tous", "toute", "toutes", "comme", "sont", "est",
    ]
    .into_iter()
    .collect()
});

static GERMAN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aber", "alle", "als", "also", "auch", "auf", "aus", "bei", "bin", "bis", "bist", "da",
        "damit", "dann", "das", "dass", "dem", "den", "der", "des", "dich", "die", "dir", "doch",
        "du", "durch", "ein", "eine", "einem", "einen", "einer", "eines", "er", "es", "für",
        "hab", "habe", "haben", "hat", "hatte", "hier", "ich", "ihr", "ihre", "im", "in", "ist",
        "ja", "kann", "mein", "meine", "mich", "mir", "mit", "muss", "nach", "nicht", "noch",
        "nur", "oder", "sein", "seine", "sich", "sie", "sind", "so", "über", "um", "und", "uns",
        "unser", "vom", "von", "vor", "war", "waren", "was", "wenn", "wer", "wie", "wir", "wird",
        "zu", "zum", "zur",
    ]
    .into_iter()
    .collect()
});

static SPANISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "al", "algo", "ante", "antes", "como", "con", "contra", "cual", "cuando", "de", "del",
        "desde", "donde", "durante", "el", "ella", "ellas", "ellos", "en", "entre", "era", "eran",
        "es", "esa", "esas", "ese", "eso", "esos", "esta", "estas", "este", "esto", "estos",
        "fue", "fueron", "ha", "han", "hasta", "hay", "la", "las", "le", "les", "lo", "los",
        "más", "me", "mi", "mis", "mucho", "muy", "nada", "ni", "no", "nos", "nosotros", "nuestra",
        "nuestro", "o", "os", "otra", "otro", "para", "pero", "poco", "por", "porque", "que",
        "quien", "se", "ser", "si", "sin", "sobre", "son", "su", "sus", "también", "te", "tiene",
        "todo", "todos", "tu", "tus", "un", "una", "uno", "unos", "vosotros", "y", "ya", "yo",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_contains_common_function_words() {
        let stop = for_language(Language::English);
        for word in ["the", "and", "from", "should"] {
            assert!(stop.contains(word), "missing {word}");
        }
    }

    #[test]
    fn english_contains_contraction_fragments() {
        let stop = for_language(Language::English);
        assert!(stop.contains("don"));
        assert!(stop.contains("t"));
        assert!(stop.contains("ve"));
    }

    #[test]
    fn content_words_are_not_stopped() {
        let stop = for_language(Language::English);
        assert!(!stop.contains("feature"));
        assert!(!stop.contains("salience"));
    }

    #[test]
    fn every_language_has_a_set() {
        for lang in [
            Language::English,
            Language::French,
            Language::German,
            Language::Spanish,
        ] {
            assert!(!for_language(lang).is_empty(), "empty set for {lang}");
        }
    }

    #[test]
    fn language_as_str() {
        assert_eq!(Language::English.as_str(), "english");
        assert_eq!(Language::French.as_str(), "french");
        assert_eq!(Language::German.as_str(), "german");
        assert_eq!(Language::Spanish.as_str(), "spanish");
    }
}
