//! Risk check workflow
//!
//! Runs one submission end to end: prepare the payload from the raw form,
//! send it to the prediction service, interpret the probability. The checker
//! keeps no per-submission state, so one instance serves any number of
//! concurrent callers.

use crate::services::prediction::PredictionClient;
use diacheck_shared::{
    prepare, score_from_probability, CheckError, ModelType, PreparedCheck, RawForm,
    RequestPayload, RiskAssessment,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Risk check workflow bound to a prediction client
#[derive(Clone)]
pub struct RiskChecker {
    client: Arc<dyn PredictionClient>,
}

impl RiskChecker {
    pub fn new(client: Arc<dyn PredictionClient>) -> Self {
        Self { client }
    }

    #[inline]
    pub fn client(&self) -> &dyn PredictionClient {
        self.client.as_ref()
    }

    /// Validate the form and run the full check
    pub async fn check(
        &self,
        form: &RawForm,
        model_type: ModelType,
    ) -> Result<RiskAssessment, CheckError> {
        let span = info_span!("risk_check", model_type = %model_type);
        async move {
            let prepared = self.prepare(form, model_type)?;
            self.submit(&prepared.payload).await
        }
        .instrument(span)
        .await
    }

    /// Pure part of the workflow: parse, validate, derive BMI, build payload
    pub fn prepare(&self, form: &RawForm, model_type: ModelType) -> Result<PreparedCheck, CheckError> {
        prepare(form, model_type).map_err(|e| {
            // Form values are health data; log only which rule failed
            debug!(code = e.code(), field = e.field().unwrap_or(""), "Form rejected");
            record_outcome(model_type, e.code());
            e
        })
    }

    /// Send a prepared payload and interpret the response
    ///
    /// BMI and, for the full variant, the lab values are echoed from the
    /// payload into the result.
    pub async fn submit(&self, payload: &RequestPayload) -> Result<RiskAssessment, CheckError> {
        let model_type = payload.model_type;

        let response = match self.client.predict(payload).await {
            Ok(response) => response,
            Err(e) => {
                record_outcome(model_type, e.code());
                return Err(e);
            }
        };

        let probability = response.probability();
        let (_, clamped) = score_from_probability(probability);
        if clamped {
            warn!(probability, "Prediction probability outside [0, 1]; clamping");
        }

        let result = RiskAssessment::from_probability(
            model_type,
            probability,
            payload.bmi,
            payload.hba1c_level,
            payload.blood_glucose_level,
        );

        info!(score = result.score, category = %result.category, "Risk check complete");
        record_outcome(model_type, "SUCCESS");
        Ok(result)
    }
}

fn record_outcome(model_type: ModelType, outcome: &'static str) {
    counter!(
        "diacheck_checks_total",
        "model_type" => model_type.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
