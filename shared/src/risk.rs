//! Risk classification
//!
//! Maps the prediction service's probability to a percentage score and a
//! three-tier category with fixed advice.
//!
//! The 30/50 thresholds are a presentation choice made on this side of the
//! wire. If the service's model is recalibrated they may no longer match its
//! notion of risk, so they live here and nowhere else.

use crate::form::ModelType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score classified as [`RiskCategory::Sedang`]
pub const MODERATE_THRESHOLD: u8 = 30;

/// Lowest score classified as [`RiskCategory::Tinggi`]
pub const HIGH_THRESHOLD: u8 = 50;

/// Risk category shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Low
    Rendah,
    /// Moderate
    Sedang,
    /// High
    Tinggi,
}

impl RiskCategory {
    /// Fixed advice for the category
    pub fn advice(&self) -> &'static str {
        match self {
            RiskCategory::Rendah => {
                "Pertahankan pola hidup sehat dan lakukan pemeriksaan kesehatan secara berkala."
            }
            RiskCategory::Sedang => {
                "Mulai perbaiki pola makan, kurangi makanan tinggi gula, dan tambah aktivitas fisik ringan."
            }
            RiskCategory::Tinggi => {
                "Sebaiknya konsultasikan hasil ini dengan tenaga kesehatan dan lakukan pemeriksaan gula darah."
            }
        }
    }

    /// Accent colour used when rendering the category
    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskCategory::Rendah => "#0F766E", // teal
            RiskCategory::Sedang => "#D97706", // amber
            RiskCategory::Tinggi => "#DC2626", // red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Rendah => "Rendah",
            RiskCategory::Sedang => "Sedang",
            RiskCategory::Tinggi => "Tinggi",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a percentage score
///
/// Total over `u8`; scores above 100 classify as [`RiskCategory::Tinggi`].
pub fn classify(score: u8) -> RiskCategory {
    if score < MODERATE_THRESHOLD {
        RiskCategory::Rendah
    } else if score < HIGH_THRESHOLD {
        RiskCategory::Sedang
    } else {
        RiskCategory::Tinggi
    }
}

/// Convert a probability into an integer percentage in [0, 100]
///
/// Returns the score and whether the probability had to be clamped into
/// [0, 1] first.
pub fn score_from_probability(probability: f64) -> (u8, bool) {
    if probability.is_nan() {
        return (0, true);
    }
    let clamped = probability.clamp(0.0, 1.0);
    ((clamped * 100.0).round() as u8, clamped != probability)
}

/// Display-ready result of a risk check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub model_type: ModelType,
    /// Probability as returned by the service (after defaulting)
    pub probability: f64,
    /// Integer percent in [0, 100]
    pub score: u8,
    pub category: RiskCategory,
    pub advice: String,
    pub color: String,
    pub bmi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_glucose: Option<f64>,
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    /// Interpret a probability for the given submission
    ///
    /// `hba1c` and `blood_glucose` are echoed only for the full variant.
    pub fn from_probability(
        model_type: ModelType,
        probability: f64,
        bmi: f64,
        hba1c: Option<f64>,
        blood_glucose: Option<f64>,
    ) -> Self {
        let (score, _) = score_from_probability(probability);
        let category = classify(score);
        let (hba1c, blood_glucose) = match model_type {
            ModelType::Full => (hba1c, blood_glucose),
            ModelType::Quick => (None, None),
        };

        Self {
            model_type,
            probability,
            score,
            category,
            advice: category.advice().to_string(),
            color: category.color_hex().to_string(),
            bmi,
            hba1c,
            blood_glucose,
            assessed_at: Utc::now(),
        }
    }
}
