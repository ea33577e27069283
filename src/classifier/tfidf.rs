//! TF-IDF vectorizer.

use super::text::Analyzer;
use crate::error::{LibrisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Maps documents to L2-normalized TF-IDF vectors over a fitted vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    analyzer: Analyzer,
    /// Term to column index; columns follow the sorted term order.
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and smoothed inverse document frequencies.
    ///
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
    pub fn fit(analyzer: Analyzer, docs: &[String]) -> Result<Self> {
        let analyzed: Vec<BTreeSet<String>> = docs
            .iter()
            .map(|d| analyzer.analyze(d).into_iter().collect())
            .collect();

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for terms in &analyzed {
            for term in terms {
                *doc_freq.entry(term.clone()).or_default() += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(LibrisError::Classifier(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        Ok(Self {
            analyzer,
            vocabulary,
            idf,
        })
    }

    /// Vectorize a single document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, doc: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.idf.len()];
        for term in self.analyzer.analyze(doc) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                row[idx] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }

        row
    }

    /// Number of features (vocabulary size).
    pub fn num_features(&self) -> usize {
        self.idf.len()
    }

    /// Column index of a term, if known.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Check that the persisted vocabulary and idf table agree.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len()
            || self.vocabulary.values().any(|&i| i >= self.idf.len())
        {
            return Err(LibrisError::Classifier(
                "vectorizer vocabulary does not match idf table".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_idf_is_smoothed() {
        let vectorizer =
            TfidfVectorizer::fit(Analyzer::new(1, 1, &[]), &docs(&["rojo azul", "rojo verde"]))
                .unwrap();

        assert_eq!(vectorizer.num_features(), 3);
        let rojo = vectorizer.term_index("rojo").unwrap();
        let azul = vectorizer.term_index("azul").unwrap();
        // df=2 of n=2 -> ln(3/3)+1 = 1; df=1 -> ln(3/2)+1
        assert!((vectorizer.idf[rojo] - 1.0).abs() < 1e-12);
        assert!((vectorizer.idf[azul] - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vectorizer = TfidfVectorizer::fit(
            Analyzer::new(1, 2, &[]),
            &docs(&["dragones y magia", "detective y crimen"]),
        )
        .unwrap();

        let row = vectorizer.transform("magia magia dragones");
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_terms_give_zero_vector() {
        let vectorizer =
            TfidfVectorizer::fit(Analyzer::new(1, 1, &[]), &docs(&["espada", "pistola"])).unwrap();
        let row = vectorizer.transform("zzz qqq");
        assert!(row.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_only_stop_words_is_error() {
        let stop = docs(&["de", "la"]);
        let result = TfidfVectorizer::fit(Analyzer::new(1, 2, &stop), &docs(&["de la", "la de"]));
        assert!(result.is_err());
    }
}
