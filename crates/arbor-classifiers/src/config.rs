//! Classifier selection and configuration.
//!
//! A classifier is requested by name plus a Weka-style whitespace-tokenized
//! option string (for example `-C 0.25 -M 2`). An empty name resolves to the
//! fixed default: a pruned decision tree, in which case the option string is
//! ignored entirely.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArborError;

/// Default confidence factor for decision-tree pruning.
pub const DEFAULT_CONFIDENCE_FACTOR: f32 = 0.25;
/// Default minimum number of training instances per leaf.
pub const DEFAULT_MIN_LEAF: usize = 2;

/// Supported classifier variants and their hyper-parameters.
/// The variant set is closed and explicit; lookup is by name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    DecisionTree {
        confidence_factor: f32,
        min_leaf: usize,
        pruned: bool,
    },
    NaiveBayes,
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::DecisionTree {
            confidence_factor: DEFAULT_CONFIDENCE_FACTOR,
            min_leaf: DEFAULT_MIN_LEAF,
            pruned: true,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decision_tree" | "tree" => Ok(ModelType::default()),
            "naive_bayes" | "nb" => Ok(ModelType::NaiveBayes),
            _ => Err(format!(
                "unknown model type: {}. Supported: decision_tree, naive_bayes",
                s
            )),
        }
    }
}

impl ModelType {
    /// Apply a whitespace-tokenized option string on top of the variant's
    /// defaults. Unknown flags, missing values and unparsable values are
    /// all option errors.
    pub fn apply_options(&mut self, options: &str) -> Result<(), ArborError> {
        let mut tokens = options.split_whitespace();
        while let Some(token) = tokens.next() {
            match self {
                ModelType::DecisionTree {
                    confidence_factor,
                    min_leaf,
                    pruned,
                } => match token {
                    "-C" => {
                        *confidence_factor = parse_value(token, tokens.next())?;
                        if !(*confidence_factor > 0.0 && *confidence_factor < 1.0) {
                            return Err(ArborError::InvalidOption(format!(
                                "-C must be in (0, 1), got {}",
                                confidence_factor
                            )));
                        }
                    }
                    "-M" => *min_leaf = parse_value(token, tokens.next())?,
                    "-U" => *pruned = false,
                    other => {
                        return Err(ArborError::InvalidOption(format!(
                            "decision_tree does not accept '{}'",
                            other
                        )))
                    }
                },
                ModelType::NaiveBayes => {
                    return Err(ArborError::InvalidOption(format!(
                        "naive_bayes does not accept options, got '{}'",
                        token
                    )))
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&str>) -> Result<T, ArborError> {
    let value = value
        .ok_or_else(|| ArborError::InvalidOption(format!("{} requires a value", flag)))?;
    value
        .parse::<T>()
        .map_err(|_| ArborError::InvalidOption(format!("{}: bad value '{}'", flag, value)))
}

/// A configured, not-yet-fit classifier selection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ClassifierConfig {
    pub model_type: ModelType,
}

impl ClassifierConfig {
    pub fn new(model_type: ModelType) -> Self {
        Self { model_type }
    }

    /// Resolve a classifier name and option string into a configuration.
    ///
    /// An empty name yields the fixed default regardless of `options`.
    pub fn resolve(name: &str, options: &str) -> Result<Self, ArborError> {
        if name.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut model_type = ModelType::from_str(name.trim())
            .map_err(|_| ArborError::UnknownClassifier(name.trim().to_string()))?;
        model_type.apply_options(options)?;
        Ok(Self { model_type })
    }
}
