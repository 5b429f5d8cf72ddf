//! Report Requestor: one model round-trip per report.
//!
//! Flow: build prompt → model call (prompt + response schema) → trim →
//!       parse JSON → validate against schema → deserialize typed report.
//!
//! Parsing and validation are separate steps: syntactically valid JSON that
//! breaks the schema is just as invalid as truncated text. No retry here.

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::analysis::prompt_builder::{build_comparison_prompt, build_single_prompt};
use crate::analysis::report::{ComparisonReport, Report, ReportKind};
use crate::analysis::schema::{ReportSchema, COMPARISON_REPORT_SCHEMA, SINGLE_REPORT_SCHEMA};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, StructuredGenerator, COMPARISON_MODEL, SINGLE_REPORT_MODEL};
use crate::persona::models::Persona;

/// Requests one persona's interpretive report.
pub async fn request_single_report(
    model: &dyn StructuredGenerator,
    title: &str,
    body: &str,
    persona: &Persona,
) -> Result<Report, AppError> {
    let prompt = build_single_prompt(title, body, persona);
    let raw = model
        .generate_json(
            SINGLE_REPORT_MODEL,
            &prompt,
            &SINGLE_REPORT_SCHEMA.response_schema(),
        )
        .await?;

    let report: Report = parse_report(&raw, &SINGLE_REPORT_SCHEMA, ReportKind::Single)?;
    info!(
        "Single report parsed: {} interpretations, {} sensitivities",
        report.key_interpretations.len(),
        report.potential_sensitivities.len()
    );
    Ok(report)
}

/// Requests the convergence/divergence report for a pair of personas.
pub async fn request_comparison_report(
    model: &dyn StructuredGenerator,
    title: &str,
    body: &str,
    persona1: &Persona,
    persona2: &Persona,
) -> Result<ComparisonReport, AppError> {
    let prompt = build_comparison_prompt(title, body, persona1, persona2);
    let raw = model
        .generate_json(
            COMPARISON_MODEL,
            &prompt,
            &COMPARISON_REPORT_SCHEMA.response_schema(),
        )
        .await?;

    let report: ComparisonReport =
        parse_report(&raw, &COMPARISON_REPORT_SCHEMA, ReportKind::Comparison)?;
    info!(
        "Comparison report parsed: {} convergence, {} divergence points",
        report.convergence_points.len(),
        report.divergence_points.len()
    );
    Ok(report)
}

/// Turns raw model text into a typed report, or `InvalidReportFormat`.
///
/// Never yields a partially-populated report.
pub fn parse_report<T: DeserializeOwned>(
    raw: &str,
    schema: &ReportSchema,
    kind: ReportKind,
) -> Result<T, AppError> {
    let invalid = |reason: String| {
        error!("Failed to parse {kind} report from model: {reason}. Raw response: {raw}");
        AppError::InvalidReportFormat {
            kind,
            reason,
            raw: raw.to_string(),
        }
    };

    let text = strip_json_fences(raw);

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?;

    schema
        .validate(&value)
        .map_err(|violation| invalid(format!("schema violation: {violation}")))?;

    serde_json::from_value(value).map_err(|e| invalid(format!("does not match report type: {e}")))
}
