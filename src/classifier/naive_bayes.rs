//! Multinomial Naive Bayes over dense feature vectors.

use crate::error::{LibrisError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Smallest smoothing value accepted; zero would give `ln(0)` feature weights.
const MIN_ALPHA: f64 = 1e-10;

/// A fitted multinomial Naive Bayes model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Class labels in sorted order.
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit the model on feature rows `x` with labels `y`.
    pub fn fit(x: &[Vec<f64>], y: &[String], alpha: f64) -> Result<Self> {
        if x.is_empty() {
            return Err(LibrisError::Classifier("no training samples".to_string()));
        }
        if x.len() != y.len() {
            return Err(LibrisError::Classifier(format!(
                "{} feature rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(LibrisError::Classifier(format!("invalid alpha: {}", alpha)));
        }
        let alpha = if alpha < MIN_ALPHA {
            warn!("alpha too small, clipping to {}", MIN_ALPHA);
            MIN_ALPHA
        } else {
            alpha
        };

        let num_features = x[0].len();
        if x.iter().any(|row| row.len() != num_features) {
            return Err(LibrisError::Classifier(
                "feature rows have different lengths".to_string(),
            ));
        }

        let mut classes: Vec<String> = y.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; num_features]; classes.len()];

        for (row, label) in x.iter().zip(y) {
            let c = classes
                .binary_search(label)
                .map_err(|_| LibrisError::Classifier(format!("unknown label: {}", label)))?;
            class_count[c] += 1;
            for (acc, v) in feature_count[c].iter_mut().zip(row) {
                *acc += v;
            }
        }

        let total = x.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&n| (n as f64 / total).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let smoothed_total: f64 = counts.iter().sum::<f64>() + alpha * num_features as f64;
                counts
                    .into_iter()
                    .map(|n| (n + alpha).ln() - smoothed_total.ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Unnormalized log posterior for every class.
    pub fn joint_log_likelihood(&self, row: &[f64]) -> Result<Vec<f64>> {
        let expected = self.num_features();
        if row.len() != expected {
            return Err(LibrisError::Classifier(format!(
                "expected {} features, got {}",
                expected,
                row.len()
            )));
        }

        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(flp, prior)| prior + flp.iter().zip(row).map(|(w, v)| w * v).sum::<f64>())
            .collect())
    }

    /// Most likely class. Ties go to the first class in sorted order.
    pub fn predict(&self, row: &[f64]) -> Result<&str> {
        let jll = self.joint_log_likelihood(row)?;
        let mut best = 0;
        for (i, score) in jll.iter().enumerate() {
            if *score > jll[best] {
                best = i;
            }
        }
        Ok(self.classes[best].as_str())
    }

    /// Posterior probability of every class, in class order.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(row)?;
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_sum = max + jll.iter().map(|s| (s - max).exp()).sum::<f64>().ln();
        Ok(jll.iter().map(|s| (s - log_sum).exp()).collect())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn num_features(&self) -> usize {
        self.feature_log_prob.first().map(|f| f.len()).unwrap_or(0)
    }

    /// Check that persisted tables are consistent with each other.
    pub(crate) fn validate(&self) -> Result<()> {
        let n = self.num_features();
        if self.classes.is_empty()
            || self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
            || self.feature_log_prob.iter().any(|f| f.len() != n)
        {
            return Err(LibrisError::Classifier(
                "naive bayes tables are inconsistent".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_and_predict() {
        let x = vec![
            vec![3.0, 0.0, 0.0],
            vec![2.0, 1.0, 0.0],
            vec![0.0, 0.0, 4.0],
            vec![0.0, 1.0, 3.0],
        ];
        let y = labels(&["a", "a", "b", "b"]);
        let model = MultinomialNb::fit(&x, &y, 1.0).unwrap();

        assert_eq!(model.classes(), &["a", "b"]);
        assert_eq!(model.predict(&[1.0, 0.0, 0.0]).unwrap(), "a");
        assert_eq!(model.predict(&[0.0, 0.0, 1.0]).unwrap(), "b");
    }

    #[test]
    fn test_feature_log_prob_matches_formula() {
        let x = vec![vec![2.0, 0.0], vec![0.0, 1.0]];
        let y = labels(&["a", "b"]);
        let model = MultinomialNb::fit(&x, &y, 0.5).unwrap();

        // class a: (2 + 0.5) / (2 + 0.5 * 2)
        let expected = (2.5f64 / 3.0).ln();
        assert!((model.feature_log_prob[0][0] - expected).abs() < 1e-12);
        assert!((model.class_log_prior[0] - 0.5f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_row_uses_priors() {
        let x = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let y = labels(&["b", "b", "a"]);
        let model = MultinomialNb::fit(&x, &y, 1.0).unwrap();
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), "b");
    }

    #[test]
    fn test_ties_go_to_first_class() {
        let x = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let y = labels(&["zeta", "alfa"]);
        let model = MultinomialNb::fit(&x, &y, 1.0).unwrap();
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), "alfa");
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let x = vec![vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0], vec![1.0, 1.0, 1.0]];
        let y = labels(&["x", "y", "z"]);
        let model = MultinomialNb::fit(&x, &y, 0.1).unwrap();
        let proba = model.predict_proba(&[0.5, 0.2, 0.1]).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(MultinomialNb::fit(&[], &[], 1.0).is_err());
        assert!(MultinomialNb::fit(&[vec![1.0]], &labels(&["a", "b"]), 1.0).is_err());
        assert!(MultinomialNb::fit(&[vec![1.0]], &labels(&["a"]), -1.0).is_err());

        let model = MultinomialNb::fit(&[vec![1.0, 0.0]], &labels(&["a"]), 0.0).unwrap();
        assert!(model.alpha() > 0.0);
        assert!(model.predict(&[1.0]).is_err());
    }
}
