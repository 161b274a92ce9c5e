//! Fixtures shared by the server's unit tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cardiorisk_config::ServerConfig;
use cardiorisk_core::{Classifier, ModelError, FEATURE_COUNT};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app;
use crate::state::ServerState;

/// Always returns the same probability.
pub struct FixedClassifier(pub f64);

impl Classifier for FixedClassifier {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Records every row it is asked to score.
pub struct RecordingClassifier {
    pub probability: f64,
    pub seen: Mutex<Vec<Vec<f64>>>,
}

impl RecordingClassifier {
    pub fn new(probability: f64) -> Self {
        Self { probability, seen: Mutex::new(Vec::new()) }
    }
}

impl Classifier for RecordingClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        self.seen.lock().unwrap().push(features.to_vec());
        Ok(self.probability)
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}

/// Fails every call with the given error.
pub struct FailingClassifier(pub ModelError);

impl Classifier for FailingClassifier {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Err(self.0.clone())
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}

pub struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ModelError> {
        panic!("numeric kernel exploded")
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn kind(&self) -> &'static str {
        "panicking"
    }
}

pub fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("cardiorisk-server-{}-{}-{}", std::process::id(), nanos, name))
}

pub fn state_with(model: Arc<dyn Classifier>) -> Arc<ServerState> {
    let state = ServerState::new();
    state.install_model(model);
    Arc::new(state)
}

pub fn test_app(state: Arc<ServerState>) -> Router {
    app::router(state, &ServerConfig::default())
}

pub fn sample_patient() -> Value {
    json!({
        "age": "63",
        "sex": "1",
        "cp": "3",
        "trestbps": "145",
        "chol": "233",
        "fbs": "1",
        "restecg": "0",
        "thalch": "150",
        "exang": "0",
        "oldpeak": "2.3",
        "slope": "0",
        "ca": "0",
        "thal": "1"
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends one request and decodes the JSON body (`Null` when empty).
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
