//! DiaCheck WASM Module
//!
//! WebAssembly bindings so a browser form can run the pure part of the risk
//! check locally: BMI, classification and payload preparation. The request
//! to the prediction service stays with the page.

use diacheck_shared::{classify, compute_bmi, prepare, ModelType, RawForm};
use wasm_bindgen::prelude::*;

/// Calculate BMI (IMT) rounded to one decimal, or nothing if the inputs
/// cannot produce one
#[wasm_bindgen]
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    compute_bmi(height_cm, weight_kg).ok()
}

/// Category label for a percentage score
#[wasm_bindgen]
pub fn classify_score(score: u8) -> String {
    classify(score).as_str().to_string()
}

/// Advice text for a percentage score
#[wasm_bindgen]
pub fn advice_for_score(score: u8) -> String {
    classify(score).advice().to_string()
}

/// Build the prediction payload from the form's JSON
///
/// `model_type` is `"quick"` or `"full"`. On failure the error is the
/// message the form should show.
#[wasm_bindgen]
pub fn build_payload_json(form_json: &str, model_type: &str) -> Result<String, JsValue> {
    prepare_payload(form_json, model_type).map_err(|msg| JsValue::from_str(&msg))
}

fn prepare_payload(form_json: &str, model_type: &str) -> Result<String, String> {
    let model_type: ModelType = model_type
        .parse()
        .map_err(|_| format!("Jenis tes tidak dikenal: {}", model_type))?;
    let form: RawForm = serde_json::from_str(form_json).map_err(|e| e.to_string())?;
    let prepared = prepare(&form, model_type).map_err(|e| e.to_string())?;
    serde_json::to_string(&prepared.payload).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        assert_eq!(calculate_bmi(160.0, 60.0), Some(23.4));
        assert_eq!(calculate_bmi(0.0, 60.0), None);
    }

    #[test]
    fn test_classify_and_advice() {
        assert_eq!(classify_score(29), "Rendah");
        assert_eq!(classify_score(30), "Sedang");
        assert_eq!(classify_score(50), "Tinggi");
        assert!(advice_for_score(75).starts_with("Sebaiknya konsultasikan"));
    }

    #[test]
    fn test_prepare_payload() {
        let form = r#"{"age":"45","gender":"Female","height":"160","weight":"60"}"#;
        let payload: serde_json::Value =
            serde_json::from_str(&prepare_payload(form, "quick").unwrap()).unwrap();
        assert_eq!(payload["bmi"], 23.4);
        assert_eq!(payload["model_type"], "quick");
        assert_eq!(payload["smoking_history"], "never");
    }

    #[test]
    fn test_prepare_payload_reports_form_message() {
        let form = r#"{"age":"45","gender":"Female","height":"160","weight":"60"}"#;
        assert_eq!(
            prepare_payload(form, "full").unwrap_err(),
            "Nilai HbA1c dan glukosa darah perlu diisi untuk tes lengkap."
        );
        assert_eq!(
            prepare_payload(form, "premium").unwrap_err(),
            "Jenis tes tidak dikenal: premium"
        );
    }
}
