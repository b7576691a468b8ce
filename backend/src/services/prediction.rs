//! Prediction service client
//!
//! The remote model is reached through the [`PredictionClient`] trait so the
//! workflow can run against a stub. [`HttpPredictionClient`] is the real
//! implementation: one `POST {API_BASE}/predict` per call, no retries.

use crate::config::PredictionConfig;
use async_trait::async_trait;
use diacheck_shared::{CheckError, PredictionErrorBody, PredictionResponse, RequestPayload};
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::{debug, warn};

/// Port to the external prediction service
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Send one prediction request
    ///
    /// Fails with [`CheckError::ServerError`] on a non-success status,
    /// [`CheckError::ConnectionError`] when no response was obtained and
    /// [`CheckError::InvalidResponse`] when a success body cannot be read.
    async fn predict(&self, payload: &RequestPayload) -> Result<PredictionResponse, CheckError>;

    /// Check that the service answers at all
    async fn ping(&self) -> Result<(), CheckError>;
}

/// reqwest-backed prediction client
#[derive(Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
    predict_url: String,
}

impl HttpPredictionClient {
    /// Build a client for the configured service
    ///
    /// No timeout is applied unless `request_timeout_secs` is set.
    pub fn new(config: &PredictionConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url().to_string(),
            predict_url: config.predict_url(),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, payload: &RequestPayload) -> Result<PredictionResponse, CheckError> {
        let started = Instant::now();

        // .json() sets Content-Type: application/json
        let response = match self.http.post(&self.predict_url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, url = %self.predict_url, "Prediction service unreachable");
                counter!("diacheck_prediction_requests_total", "status" => "unreachable")
                    .increment(1);
                return Err(CheckError::ConnectionError);
            }
        };

        let status = response.status();
        histogram!("diacheck_prediction_latency_seconds").record(started.elapsed().as_secs_f64());
        counter!("diacheck_prediction_requests_total", "status" => status.as_u16().to_string())
            .increment(1);

        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Prediction response body could not be read");
            CheckError::ConnectionError
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<PredictionErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!(status = status.as_u16(), has_message = message.is_some(), "Prediction service returned an error");
            return Err(CheckError::server(message));
        }

        serde_json::from_slice::<PredictionResponse>(&body).map_err(|e| {
            warn!(error = %e, "Prediction response is not valid JSON");
            CheckError::InvalidResponse
        })
    }

    async fn ping(&self) -> Result<(), CheckError> {
        match self.http.get(&self.base_url).send().await {
            Ok(response) => {
                debug!(status = response.status().as_u16(), "Prediction service answered");
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "Prediction service ping failed");
                Err(CheckError::ConnectionError)
            }
        }
    }
}
