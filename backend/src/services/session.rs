//! Per-user form session
//!
//! Holds what one form screen shows: the form being edited, the last result
//! or error message, and where the current submission stands.
//!
//! `submit` borrows the session mutably for the whole request, so a session
//! never has two submissions in flight. Separate sessions are independent.

use crate::services::assessment::RiskChecker;
use diacheck_shared::{CheckError, ModelType, RawForm, RiskAssessment};

/// Where a submission stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    /// Terminal: the form was rejected before any request
    Invalid,
    Submitting,
    /// Terminal: a result is available
    Success,
    /// Terminal: the prediction request failed
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Invalid | SubmissionState::Success | SubmissionState::Failed
        )
    }
}

/// State of one form screen
#[derive(Debug, Clone)]
pub struct FormSession {
    model_type: ModelType,
    form: RawForm,
    state: SubmissionState,
    error: Option<String>,
    result: Option<RiskAssessment>,
}

impl FormSession {
    /// Fresh session with page-load defaults
    pub fn new(model_type: ModelType) -> Self {
        Self {
            model_type,
            form: RawForm::default(),
            state: SubmissionState::Idle,
            error: None,
            result: None,
        }
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn form(&self) -> &RawForm {
        &self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// User-facing message of the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&RiskAssessment> {
        self.result.as_ref()
    }

    /// True while a request is outstanding, or if one was abandoned
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Change one field; the shown result or error stays until the next submit
    pub fn edit(&mut self, field: &str, value: impl Into<String>) -> Result<(), CheckError> {
        self.form = self.form.clone().with_field(field, value)?;
        Ok(())
    }

    /// Back to page-load defaults
    pub fn reset(&mut self) {
        self.form = RawForm::default();
        self.state = SubmissionState::Idle;
        self.error = None;
        self.result = None;
    }

    /// Run one submission and record its outcome
    ///
    /// Any previous result and error are cleared first. On return exactly
    /// one of [`Self::result`] or [`Self::error`] is set.
    pub async fn submit(&mut self, checker: &RiskChecker) -> SubmissionState {
        self.error = None;
        self.result = None;

        self.state = SubmissionState::Validating;
        let prepared = match checker.prepare(&self.form, self.model_type) {
            Ok(prepared) => prepared,
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = SubmissionState::Invalid;
                return self.state;
            }
        };

        self.state = SubmissionState::Submitting;
        match checker.submit(&prepared.payload).await {
            Ok(result) => {
                self.result = Some(result);
                self.state = SubmissionState::Success;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = SubmissionState::Failed;
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prediction::PredictionClient;
    use async_trait::async_trait;
    use diacheck_shared::{PredictionResponse, RequestPayload, RiskCategory, CONNECTION_MESSAGE};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedClient(Result<f64, CheckError>);

    #[async_trait]
    impl PredictionClient for FixedClient {
        async fn predict(&self, _: &RequestPayload) -> Result<PredictionResponse, CheckError> {
            self.0.clone().map(|p| PredictionResponse {
                diabetes_probability: Some(p),
            })
        }

        async fn ping(&self) -> Result<(), CheckError> {
            Ok(())
        }
    }

    /// Never answers, like a request that is still in flight
    struct PendingClient;

    #[async_trait]
    impl PredictionClient for PendingClient {
        async fn predict(&self, _: &RequestPayload) -> Result<PredictionResponse, CheckError> {
            std::future::pending().await
        }

        async fn ping(&self) -> Result<(), CheckError> {
            Ok(())
        }
    }

    fn checker(answer: Result<f64, CheckError>) -> RiskChecker {
        RiskChecker::new(Arc::new(FixedClient(answer)))
    }

    fn filled_session(model_type: ModelType) -> FormSession {
        let mut session = FormSession::new(model_type);
        session.edit("age", "45").unwrap();
        session.edit("gender", "Female").unwrap();
        session.edit("height", "160").unwrap();
        session.edit("weight", "60").unwrap();
        session
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mut session = filled_session(ModelType::Quick);

        let state = session.submit(&checker(Ok(0.32))).await;

        assert_eq!(state, SubmissionState::Success);
        let result = session.result().unwrap();
        assert_eq!(result.score, 32);
        assert_eq!(result.category, RiskCategory::Sedang);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_submission_shows_message() {
        let mut session = FormSession::new(ModelType::Quick);

        let state = session.submit(&checker(Ok(0.32))).await;

        assert_eq!(state, SubmissionState::Invalid);
        assert_eq!(
            session.error(),
            Some("Usia, tinggi badan, dan berat badan perlu diisi terlebih dahulu.")
        );
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_full_session_requires_lab_values() {
        let mut session = filled_session(ModelType::Full);
        assert_eq!(session.submit(&checker(Ok(0.5))).await, SubmissionState::Invalid);
        assert_eq!(
            session.error(),
            Some("Nilai HbA1c dan glukosa darah perlu diisi untuk tes lengkap.")
        );
    }

    #[tokio::test]
    async fn test_failure_clears_previous_result() {
        let mut session = filled_session(ModelType::Quick);
        session.submit(&checker(Ok(0.1))).await;
        assert!(session.result().is_some());

        let state = session.submit(&checker(Err(CheckError::ConnectionError))).await;

        assert_eq!(state, SubmissionState::Failed);
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(CONNECTION_MESSAGE));
    }

    #[tokio::test]
    async fn test_server_message_shown_verbatim() {
        let mut session = filled_session(ModelType::Quick);
        let failing = checker(Err(CheckError::server(Some("bad input".to_string()))));

        session.submit(&failing).await;

        assert_eq!(session.state(), SubmissionState::Failed);
        assert_eq!(session.error(), Some("bad input"));
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_retry_after_edit() {
        let mut session = FormSession::new(ModelType::Quick);
        session.submit(&checker(Ok(0.6))).await;
        assert_eq!(session.state(), SubmissionState::Invalid);

        session.edit("age", "45").unwrap();
        session.edit("gender", "Male").unwrap();
        session.edit("height", "175").unwrap();
        session.edit("weight", "70").unwrap();
        // Message stays until the next submission
        assert!(session.error().is_some());

        assert_eq!(session.submit(&checker(Ok(0.6))).await, SubmissionState::Success);
        assert_eq!(session.result().unwrap().category, RiskCategory::Tinggi);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let mut session = filled_session(ModelType::Quick);
        session.submit(&checker(Ok(0.2))).await;

        session.reset();

        assert_eq!(session.form(), &RawForm::default());
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_edit_unknown_field() {
        let mut session = FormSession::new(ModelType::Quick);
        assert!(session.edit("bmi", "25").is_err());
        assert_eq!(session.form(), &RawForm::default());
    }

    #[tokio::test]
    async fn test_abandoned_submission_stays_submitting() {
        let mut session = filled_session(ModelType::Quick);
        let checker = RiskChecker::new(Arc::new(PendingClient));

        // The caller gives up waiting, as when the user navigates away
        let outcome = tokio::time::timeout(Duration::from_millis(50), session.submit(&checker)).await;
        assert!(outcome.is_err());

        assert!(session.is_submitting());
        assert!(!session.state().is_terminal());

        session.reset();
        assert!(!session.is_submitting());
    }
}
