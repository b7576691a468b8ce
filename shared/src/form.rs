//! Form state for the risk check
//!
//! [`RawForm`] is the form exactly as a UI holds it: every field a string,
//! keyed by the HTML field name. [`FormInput`] is the typed view the
//! workflow validates and turns into a request payload.

use crate::errors::CheckError;
use crate::validation::invalid_choice;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

// ============================================================================
// Choice Fields
// ============================================================================

/// Gender as the prediction model expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Smoking history categories known to the prediction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SmokingHistory {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "former")]
    Former,
    #[serde(rename = "No Info")]
    NoInfo,
}

impl SmokingHistory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingHistory::Never => "never",
            SmokingHistory::Current => "current",
            SmokingHistory::Former => "former",
            SmokingHistory::NoInfo => "No Info",
        }
    }
}

impl fmt::Display for SmokingHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmokingHistory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(SmokingHistory::Never),
            "current" => Ok(SmokingHistory::Current),
            "former" => Ok(SmokingHistory::Former),
            "No Info" => Ok(SmokingHistory::NoInfo),
            _ => Err(format!("Unknown smoking history: {}", s)),
        }
    }
}

/// Which feature set the prediction service should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Lifestyle inputs only
    Quick,
    /// Lifestyle inputs plus HbA1c and blood glucose
    Full,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Quick => "quick",
            ModelType::Full => "full",
        }
    }

    /// Whether this variant needs lab values
    pub fn requires_lab_values(&self) -> bool {
        matches!(self, ModelType::Full)
    }

    /// Smoking history choices the variant's form offers
    pub fn allowed_smoking_history(&self) -> &'static [SmokingHistory] {
        match self {
            ModelType::Quick => &[
                SmokingHistory::Never,
                SmokingHistory::Current,
                SmokingHistory::Former,
                SmokingHistory::NoInfo,
            ],
            ModelType::Full => &[SmokingHistory::Never, SmokingHistory::Current],
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick" => Ok(ModelType::Quick),
            "full" => Ok(ModelType::Full),
            _ => Err(format!("Unknown model type: {}", s)),
        }
    }
}

// ============================================================================
// Raw Form
// ============================================================================

/// Form values as entered, one string per HTML field
///
/// Deserializing accepts numbers and booleans as well as strings, so API
/// callers may send `{"age": 45}` or `{"age": "45"}`. Missing fields take
/// their page-load defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForm {
    #[serde(deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_string")]
    pub height: String,
    #[serde(deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hypertension: String,
    #[serde(deserialize_with = "lenient_string")]
    pub heart_disease: String,
    #[serde(deserialize_with = "lenient_string")]
    pub smoking_history: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hba1c: String,
    #[serde(deserialize_with = "lenient_string")]
    pub blood_glucose: String,
}

impl Default for RawForm {
    fn default() -> Self {
        Self {
            age: String::new(),
            gender: String::new(),
            height: String::new(),
            weight: String::new(),
            hypertension: "0".to_string(),
            heart_disease: "0".to_string(),
            smoking_history: SmokingHistory::Never.as_str().to_string(),
            hba1c: String::new(),
            blood_glucose: String::new(),
        }
    }
}

/// HTML field names, in form order
pub const FORM_FIELDS: &[&str] = &[
    "age",
    "gender",
    "height",
    "weight",
    "hypertension",
    "heartDisease",
    "smokingHistory",
    "hba1c",
    "bloodGlucose",
];

impl RawForm {
    /// Return a copy of the form with one field replaced
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Result<Self, CheckError> {
        let slot = match name {
            "age" => &mut self.age,
            "gender" => &mut self.gender,
            "height" => &mut self.height,
            "weight" => &mut self.weight,
            "hypertension" => &mut self.hypertension,
            "heartDisease" => &mut self.heart_disease,
            "smokingHistory" => &mut self.smoking_history,
            "hba1c" => &mut self.hba1c,
            "bloodGlucose" => &mut self.blood_glucose,
            _ => return Err(CheckError::UnknownField(name.to_string())),
        };
        *slot = value.into();
        Ok(self)
    }

    /// Interpret the strings as typed input
    ///
    /// Numeric fields that are empty, unparsable, non-finite or zero become
    /// `None`, which is what "absent" means to [`crate::validation::validate`].
    /// Choice fields must match an allowed value exactly.
    pub fn to_input(&self) -> Result<FormInput, CheckError> {
        let age = match parse_present(&self.age) {
            Some(v) if v.fract() != 0.0 => {
                return Err(CheckError::OutOfRange {
                    field: "age".to_string(),
                    message: "Usia harus berupa bilangan bulat.".to_string(),
                })
            }
            Some(v) => Some(v as i64),
            None => None,
        };

        let gender = match self.gender.trim() {
            "" => None,
            s => Some(s.parse::<Gender>().map_err(|_| invalid_choice("gender"))?),
        };

        let smoking_history = self
            .smoking_history
            .trim()
            .parse::<SmokingHistory>()
            .map_err(|_| invalid_choice("smokingHistory"))?;

        Ok(FormInput {
            age,
            gender,
            height_cm: parse_present(&self.height),
            weight_kg: parse_present(&self.weight),
            hypertension: parse_flag(&self.hypertension, "hypertension")?,
            heart_disease: parse_flag(&self.heart_disease, "heartDisease")?,
            smoking_history,
            hba1c: parse_present(&self.hba1c),
            blood_glucose: parse_present(&self.blood_glucose),
        })
    }
}

fn parse_present(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

fn parse_flag(value: &str, field: &str) -> Result<bool, CheckError> {
    match value.trim() {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(invalid_choice(field)),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(if b { "1" } else { "0" }.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

// ============================================================================
// Typed Input
// ============================================================================

/// Typed form input
///
/// Ranges mirror the limits the form's inputs advertise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FormInput {
    /// Age in years
    #[validate(range(min = 1, max = 120, message = "Usia harus antara 1 dan 120 tahun."))]
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    /// Height in centimeters
    #[validate(range(
        min = 80.0,
        max = 230.0,
        message = "Tinggi badan harus antara 80 dan 230 cm."
    ))]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[validate(range(
        min = 20.0,
        max = 250.0,
        message = "Berat badan harus antara 20 dan 250 kg."
    ))]
    pub weight_kg: Option<f64>,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub smoking_history: SmokingHistory,
    /// HbA1c in percent (full variant)
    pub hba1c: Option<f64>,
    /// Blood glucose in mg/dL (full variant)
    pub blood_glucose: Option<f64>,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            age: None,
            gender: None,
            height_cm: None,
            weight_kg: None,
            hypertension: false,
            heart_disease: false,
            smoking_history: SmokingHistory::Never,
            hba1c: None,
            blood_glucose: None,
        }
    }
}
