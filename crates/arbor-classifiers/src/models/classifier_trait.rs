use crate::dataset::Dataset;
use crate::error::ArborError;

/// The classifier capability: fit once on a full dataset, then predict a
/// class index per feature row. Implementations live next to model code and
/// are constructed through [`crate::models::factory`].
pub trait Classifier {
    /// Fit the model on the entire dataset (no internal train/validation
    /// split). Degenerate input is a training error.
    fn fit(&mut self, data: &Dataset) -> Result<(), ArborError>;

    /// Predict the class index for one feature row (class column excluded,
    /// attribute order preserved). Calling this on an unfit model, or with
    /// a feature count that differs from the fitted shape, is an
    /// evaluation error.
    fn predict(&self, features: &[f64]) -> Result<usize, ArborError>;

    /// Registry tag identifying the variant; used by the model store to
    /// reconstruct the right implementation on load.
    fn kind(&self) -> &'static str;

    /// Serialize the full classifier state (configuration plus fitted
    /// parameters) for the model store. Opaque: only same-implementation
    /// round-trips are supported.
    fn export(&self) -> Result<serde_json::Value, ArborError>;
}
