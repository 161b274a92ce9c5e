//! Core domain types and error definitions for cardiorisk.
//!
//! This crate provides the types shared across the cardiorisk service:
//!
//! - [`PatientRecord`] and [`FeatureVector`] — Request payload and its numeric form
//! - [`RiskLevel`] and [`RiskAssessment`] — Bucketed prediction result
//! - [`Classifier`] — Trait implemented by every loaded model
//! - [`InputError`] and [`ModelError`] — Errors for parsing and inference
//!
//! # Example
//!
//! ```rust
//! use cardiorisk_core::{RiskAssessment, RiskLevel};
//!
//! let assessment = RiskAssessment::from_probability(0.82);
//! assert_eq!(assessment.risk_level, RiskLevel::High);
//! assert_eq!(assessment.risk_probability, 82.0);
//! assert_eq!(assessment.confidence, 82.0);
//! ```

mod classifier;
mod patient;
mod risk;

pub use classifier::{Classifier, ModelError};
pub use patient::{FeatureVector, InputError, PatientRecord, FEATURE_COUNT, FEATURE_NAMES};
pub use risk::{RiskAssessment, RiskLevel, HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD};
