//! Shared server state and model bootstrap.

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use cardiorisk_config::ServerConfig;
use cardiorisk_core::{Classifier, FEATURE_COUNT};
use tracing::{error, info, warn};

/// State shared by every request.
///
/// The model is written at most once, before the listener starts, and only
/// read afterwards.
#[derive(Default)]
pub struct ServerState {
    model: OnceLock<Arc<dyn Classifier>>,
    load_error: OnceLock<String>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the model. Returns false if one was already installed.
    pub fn install_model(&self, model: Arc<dyn Classifier>) -> bool {
        self.model.set(model).is_ok()
    }

    pub fn record_load_failure(&self, message: impl Into<String>) {
        let _ = self.load_error.set(message.into());
    }

    pub fn model(&self) -> Option<&dyn Classifier> {
        self.model.get().map(|m| &**m)
    }

    pub fn model_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.get().map(String::as_str)
    }
}

/// Loads the configured model into a fresh state.
///
/// A load failure is recorded and the server keeps running without a model,
/// unless `model_required` is set.
pub fn init_server_state(config: &ServerConfig) -> Result<ServerState> {
    let state = ServerState::new();
    let path = &config.model_path;

    match cardiorisk_model::load_classifier(path) {
        Ok(model) => {
            info!(
                path = %path.display(),
                kind = model.kind(),
                n_features = model.n_features(),
                "Model loaded"
            );
            if model.n_features() != FEATURE_COUNT {
                warn!(
                    expected = FEATURE_COUNT,
                    actual = model.n_features(),
                    "Model feature count differs from patient record; predictions will fail"
                );
            }
            state.install_model(model);
        }
        Err(e) if config.model_required => {
            return Err(e).with_context(|| format!("failed to load model from {}", path.display()));
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Model not loaded; /predict is unavailable");
            state.record_load_failure(e.to_string());
        }
    }

    Ok(state)
}
