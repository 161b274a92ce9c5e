//! Scores a patient record with the loaded model.

use cardiorisk_core::{Classifier, PatientRecord, RiskAssessment};
use tracing::{debug, error, warn};

use crate::error::AppError;

/// Parses the record, runs the model and buckets the probability.
pub fn assess(model: &dyn Classifier, record: &PatientRecord) -> Result<RiskAssessment, AppError> {
    let features = record.to_features().map_err(|e| {
        warn!("Rejected patient record: {}", e);
        AppError::from(e)
    })?;

    let probability = model.predict_proba(features.as_slice()).map_err(|e| {
        error!(model = model.kind(), "Inference failed: {}", e);
        AppError::from(e)
    })?;

    if !(0.0..=1.0).contains(&probability) {
        error!(model = model.kind(), probability, "Model returned a probability outside [0, 1]");
        return Err(AppError::Internal(format!(
            "model returned probability {} outside [0, 1]",
            probability
        )));
    }

    debug!(probability, "Scored patient record");
    Ok(RiskAssessment::from_probability(probability))
}
