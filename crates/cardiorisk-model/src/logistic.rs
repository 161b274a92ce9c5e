//! Logistic regression.

use cardiorisk_core::{Classifier, ModelError};
use serde::Deserialize;

use crate::{check_feature_names, sigmoid, LoadError};

/// Linear model with a sigmoid link: `p = sigmoid(intercept + w · x)`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    intercept: f64,
    coefficients: Vec<f64>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

impl LogisticModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self, LoadError> {
        let model = Self { intercept, coefficients, feature_names: None };
        model.validate()?;
        Ok(model)
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<(), LoadError> {
        if self.coefficients.is_empty() {
            return Err(LoadError::invalid("logistic model has no coefficients"));
        }
        if !self.intercept.is_finite() {
            return Err(LoadError::invalid("logistic intercept is not finite"));
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(LoadError::invalid(format!("coefficient {} is not finite", i)));
        }
        check_feature_names(self.feature_names.as_ref(), self.coefficients.len())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = sigmoid(z);

        if !p.is_finite() {
            return Err(ModelError::NonFinite(p));
        }
        Ok(p)
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn kind(&self) -> &'static str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_uses_intercept_and_weights() {
        let model = LogisticModel::new(1.0, vec![2.0, -3.0]).unwrap();
        // z = 1 + 2*1 - 3*1 = 0
        assert_eq!(model.predict_proba(&[1.0, 1.0]).unwrap(), 0.5);

        let p = model.predict_proba(&[2.0, 0.0]).unwrap();
        assert!((p - 1.0 / (1.0 + (-5.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = LogisticModel::new(0.0, vec![1.0; 13]).unwrap();
        let err = model.predict_proba(&[1.0; 12]).unwrap_err();
        assert_eq!(err, ModelError::ShapeMismatch { expected: 13, actual: 12 });
    }

    #[test]
    fn test_nan_input_is_an_inference_error() {
        let model = LogisticModel::new(0.0, vec![1.0]).unwrap();
        assert!(matches!(model.predict_proba(&[f64::NAN]), Err(ModelError::NonFinite(_))));
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        assert!(LogisticModel::new(f64::NAN, vec![1.0]).is_err());
        assert!(LogisticModel::new(0.0, vec![1.0, f64::INFINITY]).is_err());
        assert!(LogisticModel::new(0.0, vec![]).is_err());
    }
}
