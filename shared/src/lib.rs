//! DiaCheck Shared Library
//!
//! Pure, I/O-free pieces of the diabetes risk check: form state, validation,
//! BMI derivation, the prediction payload and risk classification. Used by
//! the backend and the WASM bindings.

pub mod errors;
pub mod form;
pub mod health_metrics;
pub mod payload;
pub mod risk;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use form::{FormInput, Gender, ModelType, RawForm, SmokingHistory, FORM_FIELDS};
pub use health_metrics::compute_bmi;
pub use payload::{
    build_payload, prepare, PredictionErrorBody, PredictionResponse, PreparedCheck, RequestPayload,
};
pub use risk::{classify, score_from_probability, RiskAssessment, RiskCategory};
pub use validation::{check_choices, check_ranges, validate};
