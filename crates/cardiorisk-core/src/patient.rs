//! Patient payload and conversion to the model's feature vector.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features the classifier is trained on.
pub const FEATURE_COUNT: usize = 13;

/// Feature names in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalch", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Errors raised while turning a [`PatientRecord`] into features.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A field could not be read as a floating point number.
    #[error("invalid value for field `{field}`: {value:?} is not a number")]
    NotANumber { field: &'static str, value: String },
}

/// Clinical measurements for one patient, exactly as the client sent them.
///
/// Every field arrives as text. Nothing is range checked; values are only
/// parsed when a prediction is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    pub age: String,
    /// Sex (1 = male, 0 = female).
    pub sex: String,
    /// Chest pain type.
    pub cp: String,
    /// Resting blood pressure (mm Hg).
    pub trestbps: String,
    /// Serum cholesterol (mg/dl).
    pub chol: String,
    /// Fasting blood sugar > 120 mg/dl flag.
    pub fbs: String,
    /// Resting electrocardiographic result.
    pub restecg: String,
    /// Maximum heart rate achieved.
    pub thalch: String,
    /// Exercise induced angina flag.
    pub exang: String,
    /// ST depression induced by exercise relative to rest.
    pub oldpeak: String,
    /// Slope of the peak exercise ST segment.
    pub slope: String,
    /// Number of major vessels colored by fluoroscopy.
    pub ca: String,
    /// Thalassemia code.
    pub thal: String,
}

impl PatientRecord {
    /// Raw field values paired with their names, in training order.
    pub fn fields(&self) -> [(&'static str, &str); FEATURE_COUNT] {
        [
            ("age", &self.age),
            ("sex", &self.sex),
            ("cp", &self.cp),
            ("trestbps", &self.trestbps),
            ("chol", &self.chol),
            ("fbs", &self.fbs),
            ("restecg", &self.restecg),
            ("thalch", &self.thalch),
            ("exang", &self.exang),
            ("oldpeak", &self.oldpeak),
            ("slope", &self.slope),
            ("ca", &self.ca),
            ("thal", &self.thal),
        ]
    }

    /// Parses every field into the model's feature vector.
    ///
    /// Fails on the first field that is not a number.
    pub fn to_features(&self) -> Result<FeatureVector, InputError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, (field, raw)) in values.iter_mut().zip(self.fields()) {
            *slot = raw.trim().parse::<f64>().map_err(|_| InputError::NotANumber {
                field,
                value: raw.to_string(),
            })?;
        }
        Ok(FeatureVector(values))
    }
}

/// A single row of model input in training order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
