//! Health metrics calculations
//!
//! BMI (IMT) is the only metric the risk check derives itself. It is never
//! entered by the user.

use crate::errors::CheckError;

/// Calculate unrounded BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round to one decimal place, halves away from zero
///
/// Rounds the exact stored value, so 18.1499... (72.6 / 4) gives 18.1 even
/// though `18.1499... * 10.0` is exactly 181.5.
pub fn round_one_decimal(value: f64) -> f64 {
    // The only binary values sitting exactly on a .x5 tie end in .25 or .75
    let is_exact_tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if is_exact_tie {
        return (value * 10.0).round() / 10.0;
    }
    // Decimal formatting rounds the exact value; only exact ties go to even
    format!("{:.1}", value).parse().unwrap_or(f64::NAN)
}

/// BMI as sent to the prediction service, rounded to one decimal
///
/// Fails with [`CheckError::InvalidAnthropometrics`] when the height is not
/// positive or the rounded result is zero or not a finite number.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<f64, CheckError> {
    if !(height_cm > 0.0) {
        return Err(CheckError::InvalidAnthropometrics);
    }
    let bmi = round_one_decimal(calculate_bmi(weight_kg, height_cm));
    if bmi == 0.0 || !bmi.is_finite() {
        return Err(CheckError::InvalidAnthropometrics);
    }
    Ok(bmi)
}
