//! Input validation for the risk check
//!
//! Checks run in a fixed order: required fields, lab values (full variant),
//! choice fields, then numeric ranges once BMI has been derived. The first
//! failure wins.

use crate::errors::CheckError;
use crate::form::{FormInput, ModelType};
use validator::Validate;

/// Check that every value the variant needs is present
///
/// Age, height and weight are required for both variants and are checked
/// before the lab values.
pub fn validate(input: &FormInput, model_type: ModelType) -> Result<(), CheckError> {
    if input.age.is_none() || input.height_cm.is_none() || input.weight_kg.is_none() {
        return Err(CheckError::MissingRequiredField);
    }
    if model_type.requires_lab_values() && (input.hba1c.is_none() || input.blood_glucose.is_none())
    {
        return Err(CheckError::MissingLabValue);
    }
    Ok(())
}

/// Re-check choice fields against what the variant's form offers
pub fn check_choices(input: &FormInput, model_type: ModelType) -> Result<(), CheckError> {
    if input.gender.is_none() {
        return Err(invalid_choice("gender"));
    }
    if !model_type
        .allowed_smoking_history()
        .contains(&input.smoking_history)
    {
        return Err(invalid_choice("smokingHistory"));
    }
    Ok(())
}

/// Enforce the numeric ranges declared on [`FormInput`]
pub fn check_ranges(input: &FormInput) -> Result<(), CheckError> {
    let errors = match input.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };
    let field_errors = errors.field_errors();

    // Report in form order so the message is deterministic
    for (struct_field, form_field) in [("age", "age"), ("height_cm", "height"), ("weight_kg", "weight")]
    {
        if let Some(first) = field_errors.get(struct_field).and_then(|errs| errs.first()) {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} di luar batas.", get_field_display_label(form_field)));
            return Err(CheckError::OutOfRange {
                field: form_field.to_string(),
                message,
            });
        }
    }

    Err(CheckError::OutOfRange {
        field: String::new(),
        message: errors.to_string(),
    })
}

pub(crate) fn invalid_choice(field: &str) -> CheckError {
    CheckError::InvalidChoice {
        field: field.to_string(),
        label: get_field_display_label(field).to_string(),
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map form field names to the labels the form shows
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Usia",
        "gender" => "Jenis kelamin",
        "height" | "height_cm" => "Tinggi badan",
        "weight" | "weight_kg" => "Berat badan",
        "hypertension" => "Hipertensi",
        "heartDisease" | "heart_disease" => "Riwayat penyakit jantung",
        "smokingHistory" | "smoking_history" => "Kebiasaan merokok",
        "hba1c" => "HbA1c",
        "bloodGlucose" | "blood_glucose" => "Glukosa darah",
        _ => field_name,
    }
}
