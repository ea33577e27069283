//! Text normalization and tokenization for the genre classifier.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Words of two or more word characters.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Lowercase the text and strip accents.
///
/// Accents are removed by NFKD decomposition followed by dropping combining
/// marks, so "Narración" becomes "narracion" and "ñ" becomes "n".
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Split normalized text into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build contiguous word n-grams for every n in `min..=max`.
///
/// N-grams are joined by a single space. Unigrams come first, then bigrams, etc.
pub fn ngrams(tokens: &[String], min: usize, max: usize) -> Vec<String> {
    let min = min.max(1);
    let mut grams = Vec::new();

    for n in min..=max {
        if n > tokens.len() {
            break;
        }
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }

    grams
}

/// Turns raw documents into the terms the vectorizer counts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Analyzer {
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Stop words, stored normalized.
    pub stop_words: Vec<String>,
}

impl Analyzer {
    pub fn new(ngram_min: usize, ngram_max: usize, stop_words: &[String]) -> Self {
        let mut stop_words: Vec<String> = stop_words.iter().map(|w| normalize(w)).collect();
        stop_words.sort();
        stop_words.dedup();

        Self {
            ngram_min,
            ngram_max,
            stop_words,
        }
    }

    /// Normalize, tokenize, drop stop words and expand into n-grams.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(&normalize(text))
            .into_iter()
            .filter(|t| self.stop_words.binary_search(t).is_err())
            .collect();

        ngrams(&tokens, self.ngram_min, self.ngram_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Narración Histórica"), "narracion historica");
        assert_eq!(normalize("AÑO mágico"), "ano magico");
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        let tokens = tokenize("a la luz y el mar 42 x");
        assert_eq!(tokens, vec!["la", "luz", "el", "mar", "42"]);
    }

    #[test]
    fn test_ngrams() {
        let tokens: Vec<String> = ["naves", "espaciales", "robots"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let grams = ngrams(&tokens, 1, 2);
        assert_eq!(
            grams,
            vec!["naves", "espaciales", "robots", "naves espaciales", "espaciales robots"]
        );
        assert!(ngrams(&tokens[..1], 2, 2).is_empty());
    }

    #[test]
    fn test_analyzer_removes_stop_words_before_ngrams() {
        let stop = vec!["de".to_string(), "la".to_string()];
        let analyzer = Analyzer::new(1, 2, &stop);
        let terms = analyzer.analyze("Historia de la Guerra");
        assert_eq!(terms, vec!["historia", "guerra", "historia guerra"]);
    }
}
