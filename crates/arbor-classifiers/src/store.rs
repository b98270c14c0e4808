//! Durable persistence of fitted classifiers.
//!
//! The on-disk representation is an opaque envelope carrying the classifier
//! variant tag and its serialized state. It is only promised to round-trip
//! within one train→evaluate pairing of the same build; there is no
//! cross-version compatibility contract.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArborError;
use crate::models::classifier_trait::Classifier;
use crate::models::factory;

#[derive(Serialize, Deserialize)]
struct ModelEnvelope {
    kind: String,
    state: serde_json::Value,
}

/// Serialize a fitted classifier to `path`, creating or overwriting it.
pub fn save_model<P: AsRef<Path>>(model: &dyn Classifier, path: P) -> Result<(), ArborError> {
    let envelope = ModelEnvelope {
        kind: model.kind().to_string(),
        state: model.export()?,
    };
    let bytes =
        serde_json::to_vec(&envelope).map_err(|e| ArborError::Io(e.to_string()))?;
    fs::write(path.as_ref(), bytes).map_err(|e| {
        ArborError::Io(format!(
            "failed to write model file {}: {}",
            path.as_ref().display(),
            e
        ))
    })
}

/// Restore a classifier, with its fitted state, from `path`.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn Classifier>, ArborError> {
    let bytes = fs::read(path.as_ref()).map_err(|e| {
        ArborError::ModelCorrupt(format!(
            "failed to read model file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    let envelope: ModelEnvelope = serde_json::from_slice(&bytes).map_err(|e| {
        ArborError::ModelCorrupt(format!(
            "{} does not contain a serialized classifier: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    factory::restore_model(&envelope.kind, envelope.state)
}
