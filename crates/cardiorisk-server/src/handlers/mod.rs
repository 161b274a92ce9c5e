//! HTTP route handlers for the prediction server.

pub mod predict;

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{HealthResponse, RootResponse};
use crate::state::ServerState;

/// Health check endpoint.
pub async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
        model_error: state.load_error().map(str::to_string),
    })
}

pub async fn root(State(state): State<Arc<ServerState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Heart Disease Prediction API is running!",
        model_loaded: state.model_loaded(),
    })
}
