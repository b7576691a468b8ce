//! Wire types for the prediction service
//!
//! The request payload uses the exact field names the service expects,
//! including the mixed-case `HbA1c_level`.

use crate::errors::CheckError;
use crate::form::{FormInput, Gender, ModelType, RawForm, SmokingHistory};
use crate::health_metrics::compute_bmi;
use crate::validation::{check_choices, check_ranges, validate};
use serde::{Deserialize, Serialize};

/// Body of `POST {API_BASE}/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub gender: Gender,
    pub age: i64,
    pub bmi: f64,
    /// 0 or 1
    pub hypertension: u8,
    /// 0 or 1
    pub heart_disease: u8,
    pub smoking_history: SmokingHistory,
    #[serde(rename = "HbA1c_level", skip_serializing_if = "Option::is_none", default)]
    pub hba1c_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub blood_glucose_level: Option<f64>,
    pub model_type: ModelType,
}

/// Successful response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub diabetes_probability: Option<f64>,
}

impl PredictionResponse {
    /// Probability, treating an absent or null value as 0
    pub fn probability(&self) -> f64 {
        self.diabetes_probability.unwrap_or(0.0)
    }
}

/// Error response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Map validated input to the request payload
///
/// Expects `input` to have passed [`validate`] and [`check_choices`]; fields
/// those checks guarantee are read without further checks.
pub fn build_payload(
    input: &FormInput,
    bmi: f64,
    model_type: ModelType,
) -> Result<RequestPayload, CheckError> {
    let (Some(age), Some(gender)) = (input.age, input.gender) else {
        return Err(CheckError::MissingRequiredField);
    };
    let (hba1c_level, blood_glucose_level) = match model_type {
        ModelType::Full => (input.hba1c, input.blood_glucose),
        ModelType::Quick => (None, None),
    };

    Ok(RequestPayload {
        gender,
        age,
        bmi,
        hypertension: u8::from(input.hypertension),
        heart_disease: u8::from(input.heart_disease),
        smoking_history: input.smoking_history,
        hba1c_level,
        blood_glucose_level,
        model_type,
    })
}

/// Everything a submission needs before the network call
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCheck {
    pub input: FormInput,
    pub bmi: f64,
    pub payload: RequestPayload,
}

/// Run the pure part of the workflow on a raw form
///
/// Parse, validate, re-check choices, derive BMI, check ranges, build the
/// payload. The first failure is returned.
pub fn prepare(form: &RawForm, model_type: ModelType) -> Result<PreparedCheck, CheckError> {
    let input = form.to_input()?;
    validate(&input, model_type)?;
    check_choices(&input, model_type)?;

    let (Some(height_cm), Some(weight_kg)) = (input.height_cm, input.weight_kg) else {
        return Err(CheckError::MissingRequiredField);
    };
    let bmi = compute_bmi(height_cm, weight_kg)?;
    check_ranges(&input)?;
    let payload = build_payload(&input, bmi, model_type)?;

    Ok(PreparedCheck {
        input,
        bmi,
        payload,
    })
}
