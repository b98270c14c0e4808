//! Gaussian/categorical naive bayes classifier.
//!
//! Numeric features get a per-class Gaussian likelihood; nominal features
//! get Laplace-smoothed per-class frequencies. Prediction is the argmax of
//! the joint log-likelihood plus the class prior.
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, FeatureKind};
use crate::error::ArborError;
use crate::models::classifier_trait::Classifier;

const VARIANCE_FLOOR: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesClassifier {
    feature_kinds: Vec<FeatureKind>,
    n_classes: usize,
    /// Log prior per class.
    log_priors: Vec<f64>,
    features: Vec<FeatureLikelihood>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum FeatureLikelihood {
    /// Per-class mean and variance.
    Gaussian { means: Vec<f64>, variances: Vec<f64> },
    /// Per-class log probability per nominal value, Laplace smoothed.
    Categorical { log_probs: Vec<Vec<f64>> },
}

impl NaiveBayesClassifier {
    pub const KIND: &'static str = "naive_bayes";

    pub fn new() -> Self {
        NaiveBayesClassifier {
            feature_kinds: Vec::new(),
            n_classes: 0,
            log_priors: Vec::new(),
            features: Vec::new(),
        }
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for NaiveBayesClassifier {
    fn fit(&mut self, data: &Dataset) -> Result<(), ArborError> {
        let (x, y) = data.supervised()?;
        let n_classes = data.num_classes().ok_or_else(|| {
            ArborError::Training("class attribute must be nominal".to_string())
        })?;
        let kinds = data.feature_kinds();
        let n = x.len() as f64;

        let mut class_counts = vec![0usize; n_classes];
        for &label in &y {
            class_counts[label] += 1;
        }
        let log_priors: Vec<f64> = class_counts
            .iter()
            .map(|&c| (((c as f64) + 1.0) / (n + n_classes as f64)).ln())
            .collect();

        let mut features = Vec::with_capacity(kinds.len());
        for (f, kind) in kinds.iter().enumerate() {
            match kind {
                FeatureKind::Numeric => {
                    let mut means = vec![0.0; n_classes];
                    let mut variances = vec![0.0; n_classes];
                    for (row, &label) in x.iter().zip(&y) {
                        means[label] += row[f];
                    }
                    for (class, mean) in means.iter_mut().enumerate() {
                        if class_counts[class] > 0 {
                            *mean /= class_counts[class] as f64;
                        }
                    }
                    for (row, &label) in x.iter().zip(&y) {
                        let d = row[f] - means[label];
                        variances[label] += d * d;
                    }
                    for (class, variance) in variances.iter_mut().enumerate() {
                        if class_counts[class] > 0 {
                            *variance /= class_counts[class] as f64;
                        }
                        *variance = variance.max(VARIANCE_FLOOR);
                    }
                    features.push(FeatureLikelihood::Gaussian { means, variances });
                }
                FeatureKind::Nominal(arity) => {
                    let mut counts = vec![vec![0usize; *arity]; n_classes];
                    for (row, &label) in x.iter().zip(&y) {
                        let value = row[f];
                        if !(value.is_finite() && value >= 0.0 && (value as usize) < *arity) {
                            return Err(ArborError::Training(format!(
                                "feature {} holds {} which is outside its declared values",
                                f, value
                            )));
                        }
                        counts[label][value as usize] += 1;
                    }
                    let log_probs = counts
                        .iter()
                        .enumerate()
                        .map(|(class, value_counts)| {
                            let denominator = class_counts[class] as f64 + *arity as f64;
                            value_counts
                                .iter()
                                .map(|&c| ((c as f64 + 1.0) / denominator).ln())
                                .collect()
                        })
                        .collect();
                    features.push(FeatureLikelihood::Categorical { log_probs });
                }
            }
        }

        log::debug!(
            "naive bayes fit on {} rows, {} features, {} classes",
            x.len(),
            kinds.len(),
            n_classes
        );

        self.feature_kinds = kinds;
        self.n_classes = n_classes;
        self.log_priors = log_priors;
        self.features = features;
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<usize, ArborError> {
        if self.n_classes == 0 {
            return Err(ArborError::Evaluation(
                "naive bayes has not been fit".to_string(),
            ));
        }
        if features.len() != self.feature_kinds.len() {
            return Err(ArborError::Evaluation(format!(
                "row has {} features but the model was fit with {}",
                features.len(),
                self.feature_kinds.len()
            )));
        }

        let mut best = (0usize, f64::NEG_INFINITY);
        for class in 0..self.n_classes {
            let mut score = self.log_priors[class];
            for (value, likelihood) in features.iter().zip(&self.features) {
                score += match likelihood {
                    FeatureLikelihood::Gaussian { means, variances } => {
                        let variance = variances[class];
                        let d = value - means[class];
                        -0.5 * (2.0 * std::f64::consts::PI * variance).ln()
                            - d * d / (2.0 * variance)
                    }
                    FeatureLikelihood::Categorical { log_probs } => {
                        let table = &log_probs[class];
                        if value.is_finite() && *value >= 0.0 && (*value as usize) < table.len() {
                            table[*value as usize]
                        } else {
                            // Unseen nominal index: smoothed floor.
                            (1.0 / (table.len() as f64 + 1.0)).ln()
                        }
                    }
                };
            }
            if score > best.1 {
                best = (class, score);
            }
        }
        Ok(best.0)
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn export(&self) -> Result<serde_json::Value, ArborError> {
        serde_json::to_value(self).map_err(|e| ArborError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Attribute;

    #[test]
    fn fits_and_predicts_gaussian_clusters() {
        let attributes = vec![
            Attribute::numeric("f1"),
            Attribute::nominal("class", &["a", "b"]),
        ];
        let rows = vec![
            vec![1.0, 0.0],
            vec![1.2, 0.0],
            vec![0.8, 0.0],
            vec![1.1, 0.0],
            vec![5.0, 1.0],
            vec![5.3, 1.0],
            vec![4.8, 1.0],
            vec![5.1, 1.0],
        ];
        let data = Dataset::new("gaussians", attributes, rows, None).unwrap();

        let mut model = NaiveBayesClassifier::new();
        model.fit(&data).unwrap();
        assert_eq!(model.predict(&[1.0]).unwrap(), 0);
        assert_eq!(model.predict(&[5.2]).unwrap(), 1);
    }

    #[test]
    fn handles_nominal_features() {
        let attributes = vec![
            Attribute::nominal("shape", &["round", "square"]),
            Attribute::nominal("class", &["a", "b"]),
        ];
        let rows = vec![
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
        ];
        let data = Dataset::new("shapes", attributes, rows, None).unwrap();

        let mut model = NaiveBayesClassifier::new();
        model.fit(&data).unwrap();
        assert_eq!(model.predict(&[0.0]).unwrap(), 0);
        assert_eq!(model.predict(&[1.0]).unwrap(), 1);
    }

    #[test]
    fn predict_before_fit_is_an_evaluation_error() {
        let model = NaiveBayesClassifier::new();
        assert!(matches!(
            model.predict(&[0.0]),
            Err(ArborError::Evaluation(_))
        ));
    }
}
