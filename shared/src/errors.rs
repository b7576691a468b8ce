//! Error types for the DiaCheck risk workflow
//!
//! The `Display` text of every variant is the message shown to the user,
//! so a caller can turn any failure into the single form-level error field
//! with `to_string()`.

use thiserror::Error;

/// Message used when the prediction service fails without saying why
pub const GENERIC_SERVER_MESSAGE: &str = "Terjadi kesalahan pada server.";

/// Message used when no usable response came back from the prediction service
pub const CONNECTION_MESSAGE: &str =
    "Tidak dapat terhubung ke server backend. Pastikan API berjalan.";

/// Errors produced by a risk check, from form validation through the
/// prediction request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Usia, tinggi badan, dan berat badan perlu diisi terlebih dahulu.")]
    MissingRequiredField,

    #[error("Nilai HbA1c dan glukosa darah perlu diisi untuk tes lengkap.")]
    MissingLabValue,

    #[error("Tinggi dan berat badan tidak valid untuk menghitung IMT.")]
    InvalidAnthropometrics,

    #[error("Pilihan untuk {label} tidak valid.")]
    InvalidChoice { field: String, label: String },

    #[error("{message}")]
    OutOfRange { field: String, message: String },

    #[error("Kolom formulir tidak dikenal: {0}")]
    UnknownField(String),

    #[error("{0}")]
    ServerError(String),

    #[error("Tidak dapat terhubung ke server backend. Pastikan API berjalan.")]
    ConnectionError,

    /// The service answered with a success status but an unreadable body
    #[error("Tidak dapat terhubung ke server backend. Pastikan API berjalan.")]
    InvalidResponse,
}

impl CheckError {
    /// Build a server error from the optional message in the error body
    pub fn server(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.trim().is_empty() => CheckError::ServerError(msg),
            _ => CheckError::ServerError(GENERIC_SERVER_MESSAGE.to_string()),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            CheckError::MissingLabValue => "MISSING_LAB_VALUE",
            CheckError::InvalidAnthropometrics => "INVALID_ANTHROPOMETRICS",
            CheckError::InvalidChoice { .. } => "INVALID_CHOICE",
            CheckError::OutOfRange { .. } => "OUT_OF_RANGE",
            CheckError::UnknownField(_) => "UNKNOWN_FIELD",
            CheckError::ServerError(_) => "SERVER_ERROR",
            CheckError::ConnectionError => "CONNECTION_ERROR",
            CheckError::InvalidResponse => "INVALID_RESPONSE",
        }
    }

    /// The form field the error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CheckError::InvalidChoice { field, .. } | CheckError::OutOfRange { field, .. } => {
                Some(field.as_str())
            }
            CheckError::UnknownField(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Whether the user can fix this by editing the form
    pub fn is_user_correctable(&self) -> bool {
        !matches!(
            self,
            CheckError::ServerError(_) | CheckError::ConnectionError | CheckError::InvalidResponse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_supplied_message() {
        let err = CheckError::server(Some("bad input".to_string()));
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn test_server_error_falls_back_to_generic() {
        assert_eq!(CheckError::server(None).to_string(), GENERIC_SERVER_MESSAGE);
        assert_eq!(
            CheckError::server(Some("  ".to_string())).to_string(),
            GENERIC_SERVER_MESSAGE
        );
    }

    #[test]
    fn test_invalid_response_reads_like_connection_error() {
        assert_eq!(CheckError::InvalidResponse.to_string(), CONNECTION_MESSAGE);
        assert_eq!(CheckError::ConnectionError.to_string(), CONNECTION_MESSAGE);
        assert_ne!(
            CheckError::InvalidResponse.code(),
            CheckError::ConnectionError.code()
        );
    }

    #[test]
    fn test_user_correctable() {
        assert!(CheckError::MissingRequiredField.is_user_correctable());
        assert!(CheckError::MissingLabValue.is_user_correctable());
        assert!(CheckError::InvalidAnthropometrics.is_user_correctable());
        assert!(!CheckError::ConnectionError.is_user_correctable());
        assert!(!CheckError::server(None).is_user_correctable());
    }

    #[test]
    fn test_invalid_choice_message_uses_label() {
        let err = CheckError::InvalidChoice {
            field: "gender".to_string(),
            label: "Jenis kelamin".to_string(),
        };
        assert_eq!(err.to_string(), "Pilihan untuk Jenis kelamin tidak valid.");
        assert_eq!(err.field(), Some("gender"));
    }
}
