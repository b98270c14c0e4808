use std::error::Error;
use std::fmt;

/// Error taxonomy for the train/evaluate pipeline.
///
/// None of these are recovered internally; every failure aborts the current
/// trainer or evaluator invocation and is surfaced at the CLI boundary.
#[derive(Debug)]
pub enum ArborError {
    /// Malformed or unreadable input table.
    DataFormat(String),
    /// Unrecognized classifier name.
    UnknownClassifier(String),
    /// Malformed classifier option tokens.
    InvalidOption(String),
    /// Fit failure (degenerate dataset, incompatible shapes).
    Training(String),
    /// Unreadable or invalid serialized model.
    ModelCorrupt(String),
    /// Prediction failure on a row.
    Evaluation(String),
    /// Raw filesystem failure outside the categories above.
    Io(String),
}

impl fmt::Display for ArborError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArborError::DataFormat(msg) => write!(f, "data format error: {}", msg),
            ArborError::UnknownClassifier(name) => write!(f, "unknown classifier: {}", name),
            ArborError::InvalidOption(msg) => write!(f, "invalid classifier option: {}", msg),
            ArborError::Training(msg) => write!(f, "training failed: {}", msg),
            ArborError::ModelCorrupt(msg) => write!(f, "model file is not usable: {}", msg),
            ArborError::Evaluation(msg) => write!(f, "evaluation failed: {}", msg),
            ArborError::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl Error for ArborError {}
