//! Model artifacts for cardiorisk.
//!
//! A model is shipped as a single JSON document tagged by `kind`:
//!
//! - `logistic` — [`LogisticModel`], a linear model with a sigmoid link
//! - `gradient_boosted_trees` — [`TreeEnsemble`], additive regression trees on the logit scale
//!
//! Artifacts are validated when they are loaded, so a classifier that makes it
//! into the server never has dangling tree references or missing weights.
//!
//! # Example
//!
//! ```rust
//! use cardiorisk_core::Classifier;
//! use cardiorisk_model::ModelArtifact;
//!
//! let artifact = ModelArtifact::from_json(
//!     r#"{ "kind": "logistic", "intercept": 0.0, "coefficients": [1.0, -1.0] }"#,
//! )
//! .unwrap();
//!
//! let model = artifact.into_classifier();
//! assert_eq!(model.n_features(), 2);
//! assert_eq!(model.predict_proba(&[0.5, 0.5]).unwrap(), 0.5);
//! ```

mod logistic;
mod trees;

pub use logistic::LogisticModel;
pub use trees::{Tree, TreeEnsemble, TreeNode};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cardiorisk_core::Classifier;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or validating a model artifact.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

impl LoadError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LoadError::Invalid(msg.into())
    }
}

/// A deserialized model of any supported family.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    GradientBoostedTrees(TreeEnsemble),
}

impl ModelArtifact {
    /// Parses and validates an artifact from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Reads, parses and validates an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "Read model artifact");
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        match self {
            ModelArtifact::Logistic(m) => m.validate(),
            ModelArtifact::GradientBoostedTrees(m) => m.validate(),
        }
    }

    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            ModelArtifact::Logistic(m) => Arc::new(m),
            ModelArtifact::GradientBoostedTrees(m) => Arc::new(m),
        }
    }
}

/// Loads the artifact at `path` and returns it ready for inference.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>, LoadError> {
    Ok(ModelArtifact::load(path)?.into_classifier())
}

fn check_feature_names(names: Option<&Vec<String>>, n_features: usize) -> Result<(), LoadError> {
    match names {
        Some(names) if names.len() != n_features => Err(LoadError::invalid(format!(
            "{} feature names given for {} features",
            names.len(),
            n_features
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
