//! Business logic for the risk check

pub mod assessment;
pub mod prediction;
pub mod session;

pub use assessment::RiskChecker;
pub use prediction::{HttpPredictionClient, PredictionClient};
pub use session::{FormSession, SubmissionState};
