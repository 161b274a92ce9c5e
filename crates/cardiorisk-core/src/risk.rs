//! Risk tiers and the assessment returned to clients.

use serde::{Deserialize, Serialize};

/// Probabilities below this are low risk.
pub const LOW_RISK_THRESHOLD: f64 = 0.3;

/// Probabilities at or above this are high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Risk tier derived from the class-1 probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Buckets a probability into a tier.
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if probability < HIGH_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskLevel::Low => "Maintain healthy habits and regular checkups.",
            RiskLevel::Moderate => "Consult a cardiologist and monitor lifestyle.",
            RiskLevel::High => "Immediate medical attention recommended.",
        }
    }
}

/// Prediction result sent back from `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Class-1 probability as a percentage, two decimals.
    pub risk_probability: f64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    /// Distance of the probability from a coin flip, as a percentage.
    pub confidence: f64,
}

impl RiskAssessment {
    /// Builds the assessment for a raw model probability in `[0, 1]`.
    pub fn from_probability(probability: f64) -> Self {
        let risk_level = RiskLevel::from_probability(probability);
        Self {
            risk_probability: round2(probability * 100.0),
            risk_level,
            recommendation: risk_level.recommendation().to_string(),
            confidence: round2(probability.max(1.0 - probability) * 100.0),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
