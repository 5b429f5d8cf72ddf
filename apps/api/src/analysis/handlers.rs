//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::orchestrator::{generate, AnalysisOutcome, AnalysisRequest};
use crate::errors::AppError;
use crate::persona::catalog::validate_persona;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// POST /api/v1/analyses
///
/// One persona → `report1`. Two personas → `report1`, `report2` and `comparison`.
/// Nothing is persisted; the response is the only copy of the reports.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(request) = payload?;
    validate_persona(&request.persona1, "persona1")?;
    if let Some(persona2) = &request.persona2 {
        validate_persona(persona2, "persona2")?;
    }

    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", %analysis_id);
    info!(
        parent: &span,
        "Analysis requested: {} persona(s), {} chars of text",
        if request.persona2.is_some() { 2 } else { 1 },
        request.body.chars().count()
    );

    let outcome = generate(state.model.clone(), request)
        .instrument(span)
        .await?;

    Ok(Json(AnalysisResponse {
        analysis_id,
        generated_at: Utc::now(),
        outcome,
    }))
}
