use crate::config::{ClassifierConfig, ModelType};
use crate::error::ArborError;
use crate::models::classifier_trait::Classifier;
use crate::models::decision_tree::DecisionTreeClassifier;
use crate::models::naive_bayes::NaiveBayesClassifier;

/// Build a boxed, unfit classifier from a `ClassifierConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(config: &ClassifierConfig) -> Box<dyn Classifier> {
    match &config.model_type {
        ModelType::DecisionTree {
            confidence_factor,
            min_leaf,
            pruned,
        } => Box::new(DecisionTreeClassifier::new(
            *confidence_factor,
            *min_leaf,
            *pruned,
        )),
        ModelType::NaiveBayes => Box::new(NaiveBayesClassifier::new()),
    }
}

/// Rebuild a fitted classifier from its registry tag and serialized state.
/// Any mismatch between tag and state is treated as a corrupt model.
pub fn restore_model(
    kind: &str,
    state: serde_json::Value,
) -> Result<Box<dyn Classifier>, ArborError> {
    match kind {
        DecisionTreeClassifier::KIND => {
            let model: DecisionTreeClassifier = serde_json::from_value(state)
                .map_err(|e| ArborError::ModelCorrupt(format!("decision_tree state: {}", e)))?;
            Ok(Box::new(model))
        }
        NaiveBayesClassifier::KIND => {
            let model: NaiveBayesClassifier = serde_json::from_value(state)
                .map_err(|e| ArborError::ModelCorrupt(format!("naive_bayes state: {}", e)))?;
            Ok(Box::new(model))
        }
        other => Err(ArborError::ModelCorrupt(format!(
            "unknown classifier kind '{}'",
            other
        ))),
    }
}
