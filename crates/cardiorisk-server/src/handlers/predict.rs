//! Patient record handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use cardiorisk_core::{PatientRecord, RiskAssessment};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::extract::AppJson;
use crate::services::prediction as prediction_service;
use crate::state::ServerState;

/// POST /test - Echo a schema-valid patient record.
pub async fn echo(AppJson(record): AppJson<PatientRecord>) -> Json<PatientRecord> {
    debug!(?record, "Echoing patient record");
    Json(record)
}

/// POST /predict - Score a patient record.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    AppJson(record): AppJson<PatientRecord>,
) -> Result<Json<RiskAssessment>, AppError> {
    let Some(model) = state.model() else {
        warn!("Prediction requested but no model is loaded");
        return Err(AppError::Unavailable("Model not loaded".into()));
    };

    let assessment = prediction_service::assess(model, &record)?;

    info!(
        risk_level = assessment.risk_level.label(),
        risk_probability = assessment.risk_probability,
        "Prediction complete"
    );
    Ok(Json(assessment))
}
