//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All fields are cheap to clone and read-only while serving requests.

use crate::config::AppConfig;
use crate::services::{HttpPredictionClient, RiskChecker};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Risk check workflow bound to the prediction client
    pub checker: RiskChecker,
    /// Renders `/metrics` when a Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around an existing checker
    pub fn new(checker: RiskChecker) -> Self {
        Self {
            checker,
            metrics: None,
        }
    }

    /// Create state with an HTTP client for the configured prediction service
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = HttpPredictionClient::new(&config.prediction)?;
        Ok(Self::new(RiskChecker::new(Arc::new(client))))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the risk checker
    #[inline]
    pub fn checker(&self) -> &RiskChecker {
        &self.checker
    }
}
