//! The seam between the server and whatever model was loaded.

use thiserror::Error;

/// Errors raised by a classifier at inference time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Input row length differs from what the model was trained on.
    #[error("feature shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The model produced NaN or infinity.
    #[error("model produced a non-finite probability: {0}")]
    NonFinite(f64),

    /// Any other failure inside the model.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A binary classifier that scores a single row.
///
/// Implementations are read-only after construction and are shared across
/// concurrent requests.
pub trait Classifier: Send + Sync {
    /// Probability that `features` belongs to class 1.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Number of input features the model expects.
    fn n_features(&self) -> usize;

    /// Short model family name for logs and health output.
    fn kind(&self) -> &'static str;
}
