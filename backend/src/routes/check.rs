//! Risk check routes
//!
//! Each request runs one independent submission of the quick or full form.
//! The body is the form as the page holds it (see `RawForm`).

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use diacheck_shared::{ModelType, RawForm, RiskAssessment};

/// Create check routes
pub fn check_routes() -> Router<AppState> {
    Router::new()
        .route("/quick", post(check_quick))
        .route("/full", post(check_full))
}

/// Quick check from lifestyle inputs
async fn check_quick(
    State(state): State<AppState>,
    Json(form): Json<RawForm>,
) -> ApiResult<Json<RiskAssessment>> {
    run_check(&state, &form, ModelType::Quick).await
}

/// Full check including HbA1c and blood glucose
async fn check_full(
    State(state): State<AppState>,
    Json(form): Json<RawForm>,
) -> ApiResult<Json<RiskAssessment>> {
    run_check(&state, &form, ModelType::Full).await
}

async fn run_check(
    state: &AppState,
    form: &RawForm,
    model_type: ModelType,
) -> ApiResult<Json<RiskAssessment>> {
    let result = state.checker().check(form, model_type).await?;
    Ok(Json(result))
}
