//! Analysis orchestration. Decides how many report requests a call needs.
//!
//! One persona: a single report request.
//! Two personas: three independent requests (report for each persona plus the
//! comparison) spawned concurrently and joined. The first failure fails the
//! whole call with the original error; the other in-flight requests are aborted.
//!
//! Nothing is cached or retried: the model is non-deterministic, so identical
//! inputs issued twice are two independent invocations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;

use crate::analysis::report::{ComparisonReport, Report};
use crate::analysis::requestor::{request_comparison_report, request_single_report};
use crate::errors::AppError;
use crate::llm_client::StructuredGenerator;
use crate::persona::models::Persona;

/// What the caller wants analysed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub persona1: Persona,
    #[serde(default)]
    pub persona2: Option<Persona>,
}

/// Reports produced for one analysis. `report2` and `comparison` are present
/// exactly when a second persona was supplied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub report1: Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report2: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonReport>,
}

/// Output of one spawned report task.
enum ReportPart {
    First(Report),
    Second(Report),
    Comparison(ComparisonReport),
}

/// Runs the analysis for one or two personas.
///
/// A blank body is rejected with `EmptyInput` before any model call, in both modes.
pub async fn generate(
    model: Arc<dyn StructuredGenerator>,
    request: AnalysisRequest,
) -> Result<AnalysisOutcome, AppError> {
    if request.body.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }

    let AnalysisRequest {
        title,
        body,
        persona1,
        persona2,
    } = request;

    let Some(persona2) = persona2 else {
        info!("Requesting single-persona report");
        let report1 = request_single_report(model.as_ref(), &title, &body, &persona1).await?;
        return Ok(AnalysisOutcome {
            report1,
            report2: None,
            comparison: None,
        });
    };

    info!("Requesting two persona reports and a comparison concurrently");
    generate_pair(model, title, body, persona1, persona2).await
}

async fn generate_pair(
    model: Arc<dyn StructuredGenerator>,
    title: String,
    body: String,
    persona1: Persona,
    persona2: Persona,
) -> Result<AnalysisOutcome, AppError> {
    let title: Arc<str> = title.into();
    let body: Arc<str> = body.into();

    // Dropping the set (early return or caller cancellation) aborts whatever is still running.
    let mut tasks: JoinSet<Result<ReportPart, AppError>> = JoinSet::new();

    {
        let (model, title, body, persona) =
            (model.clone(), title.clone(), body.clone(), persona1.clone());
        tasks.spawn(async move {
            request_single_report(model.as_ref(), &title, &body, &persona)
                .await
                .map(ReportPart::First)
        });
    }
    {
        let (model, title, body, persona) =
            (model.clone(), title.clone(), body.clone(), persona2.clone());
        tasks.spawn(async move {
            request_single_report(model.as_ref(), &title, &body, &persona)
                .await
                .map(ReportPart::Second)
        });
    }
    tasks.spawn(async move {
        request_comparison_report(model.as_ref(), &title, &body, &persona1, &persona2)
            .await
            .map(ReportPart::Comparison)
    });

    let mut report1 = None;
    let mut report2 = None;
    let mut comparison = None;

    while let Some(joined) = tasks.join_next().await {
        let part = joined
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Report task did not complete: {e}")))??;
        match part {
            ReportPart::First(r) => report1 = Some(r),
            ReportPart::Second(r) => report2 = Some(r),
            ReportPart::Comparison(c) => comparison = Some(c),
        }
    }

    let (Some(report1), Some(report2), Some(comparison)) = (report1, report2, comparison) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Report tasks finished without producing all three reports"
        )));
    };

    Ok(AnalysisOutcome {
        report1,
        report2: Some(report2),
        comparison: Some(comparison),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::analysis::report::ReportKind;
    use crate::llm_client::{LlmError, COMPARISON_MODEL, SINGLE_REPORT_MODEL};
    use crate::persona::models::{Significance, TraitKind};

    pub(crate) fn report_json(summary: &str) -> String {
        json!({
            "summary": summary,
            "keyInterpretations": [
                {"point": "mandatory", "interpretation": "A duty of care", "reasoning": "Clinical background"}
            ],
            "potentialSensitivities": [],
            "emotionalResponse": [
                {"emotion": "Concern", "intensity": "Moderate", "explanation": "Outbreak risk"}
            ],
            "positiveAspects": [],
            "criticalQuestions": []
        })
        .to_string()
    }

    pub(crate) fn comparison_json() -> String {
        json!({
            "convergencePoints": [{"topic": "Children", "sharedView": "Both want children safe"}],
            "divergencePoints": [{
                "topic": "Mandates",
                "persona1View": "Necessary",
                "persona2View": "Overreach",
                "underlyingReason": "Trust in institutions"
            }],
            "dialogueGuidance": {"principle": "Shared goals first", "practicalSteps": ["Name the common goal"]}
        })
        .to_string()
    }

    /// Fake model that answers by report kind and counts calls.
    ///
    /// Single-report answers echo the persona's formatted profession/political
    /// line into `summary` so tests can tell the two reports apart.
    /// `completed` counts calls that got past their delay.
    pub(crate) struct FakeModel {
        pub calls: AtomicUsize,
        pub completed: AtomicUsize,
        pub single: Result<(), ()>,
        pub comparison: Result<String, ()>,
        pub single_delay: Duration,
        pub comparison_delay: Duration,
    }

    impl FakeModel {
        pub(crate) fn healthy() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                single: Ok(()),
                comparison: Ok(comparison_json()),
                single_delay: Duration::ZERO,
                comparison_delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl StructuredGenerator for FakeModel {
        async fn generate_json(
            &self,
            model: &str,
            prompt: &str,
            _response_schema: &Value,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = if model == COMPARISON_MODEL {
                self.comparison_delay
            } else {
                self.single_delay
            };
            tokio::time::sleep(delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);

            if model == COMPARISON_MODEL {
                return self.comparison.clone().map_err(|_| LlmError::Api {
                    status: 500,
                    message: "comparison backend down".to_string(),
                });
            }
            assert_eq!(model, SINGLE_REPORT_MODEL);
            self.single.map_err(|_| LlmError::EmptyContent)?;

            let summary = if prompt.contains("Political View: Conservative") {
                "conservative reading"
            } else {
                "doctor reading"
            };
            Ok(report_json(summary))
        }
    }

    fn sig(n: u8) -> Significance {
        Significance::new(n).unwrap()
    }

    fn request(persona2: Option<Persona>) -> AnalysisRequest {
        AnalysisRequest {
            title: "School Vaccines".to_string(),
            body: "Vaccination should be mandatory.".to_string(),
            persona1: Persona::default().with_trait(TraitKind::Profession, "Doctor", sig(9)),
            persona2,
        }
    }

    fn conservative() -> Persona {
        Persona::default().with_trait(TraitKind::PoliticalView, "Conservative", sig(10))
    }

    #[tokio::test]
    async fn test_single_persona_issues_exactly_one_request() {
        let model = Arc::new(FakeModel::healthy());
        let outcome = generate(model.clone(), request(None)).await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.report1.summary, "doctor reading");
        assert!(outcome.report2.is_none());
        assert!(outcome.comparison.is_none());
    }

    #[tokio::test]
    async fn test_single_persona_outcome_omits_absent_parts_in_json() {
        let model = Arc::new(FakeModel::healthy());
        let outcome = generate(model, request(None)).await.unwrap();
        let value = serde_json::to_value(&outcome).unwrap();

        assert!(value.get("report1").is_some());
        assert!(value.get("report2").is_none());
        assert!(value.get("comparison").is_none());
    }

    #[tokio::test]
    async fn test_two_personas_issue_three_requests() {
        let model = Arc::new(FakeModel::healthy());
        let outcome = generate(model.clone(), request(Some(conservative())))
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.report1.summary, "doctor reading");
        assert_eq!(
            outcome.report2.as_ref().unwrap().summary,
            "conservative reading"
        );
        assert_eq!(outcome.comparison.unwrap().divergence_points.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_persona_requests_run_concurrently() {
        let model = Arc::new(FakeModel {
            single_delay: Duration::from_secs(10),
            comparison_delay: Duration::from_secs(10),
            ..FakeModel::healthy()
        });
        let started = tokio::time::Instant::now();
        generate(model, request(Some(conservative()))).await.unwrap();

        // Sequential execution would take 30s of (paused) time.
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_failed_comparison_fails_whole_call() {
        let model = Arc::new(FakeModel {
            comparison: Err(()),
            ..FakeModel::healthy()
        });
        let err = generate(model, request(Some(conservative())))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Provider(LlmError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_comparison_payload_propagates_unchanged() {
        let model = Arc::new(FakeModel {
            comparison: Ok("I'm sorry, I can't produce JSON today.".to_string()),
            ..FakeModel::healthy()
        });
        let err = generate(model, request(Some(conservative())))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidReportFormat {
                kind: ReportKind::Comparison,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "The AI returned an invalid comparison report format."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_returns_without_waiting_and_aborts_the_rest() {
        let model = Arc::new(FakeModel {
            comparison: Err(()),
            single_delay: Duration::from_secs(60),
            ..FakeModel::healthy()
        });
        let started = tokio::time::Instant::now();
        let err = generate(model.clone(), request(Some(conservative())))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Provider(LlmError::Api { status: 500, .. })));
        assert!(started.elapsed() < Duration::from_secs(60));

        // Well past the single-report delay: aborted tasks never finish.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(model.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_generate_aborts_in_flight_requests() {
        let model = Arc::new(FakeModel {
            single_delay: Duration::from_secs(60),
            comparison_delay: Duration::from_secs(60),
            ..FakeModel::healthy()
        });
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            generate(model.clone(), request(Some(conservative()))),
        )
        .await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
        assert_eq!(model.completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_single_report_fails_dual_call() {
        let model = Arc::new(FakeModel {
            single: Err(()),
            ..FakeModel::healthy()
        });
        let err = generate(model, request(Some(conservative())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Provider(LlmError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_blank_body_is_rejected_before_any_request() {
        for persona2 in [None, Some(conservative())] {
            let model = Arc::new(FakeModel::healthy());
            let mut req = request(persona2);
            req.body = "  \n\t ".to_string();

            let err = generate(model.clone(), req).await.unwrap_err();
            assert!(matches!(err, AppError::EmptyInput));
            assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_identical_requests_are_not_cached() {
        let model = Arc::new(FakeModel::healthy());
        generate(model.clone(), request(None)).await.unwrap();
        generate(model.clone(), request(None)).await.unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_request_deserializes_without_optional_fields() {
        let json = json!({
            "body": "Some text",
            "persona1": serde_json::to_value(Persona::default()).unwrap()
        });
        let req: AnalysisRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.title, "");
        assert!(req.persona2.is_none());
    }

    // ────────────────────────────────────────────────────────────────────────
    // Live scenarios against Gemini. Run with:
    //   GEMINI_API_KEY=... cargo test -- --ignored
    // ────────────────────────────────────────────────────────────────────────

    const VACCINATION_TEXT: &str = "Vaccination against measles, mumps and rubella should be \
        mandatory for every child entering public school. Outbreaks in the last decade have \
        shown that voluntary uptake is not enough to protect infants and the immunocompromised.\n\n\
        Parents who object on personal grounds should still be free to home-school, but shared \
        classrooms are a public space, and public spaces come with public obligations.";

    fn live_model() -> Arc<dyn StructuredGenerator> {
        let key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        Arc::new(
            crate::llm_client::LlmClient::new(key, crate::llm_client::DEFAULT_API_BASE.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    #[ignore = "calls the live Gemini API"]
    async fn test_live_doctor_report_has_emotions_and_complete_interpretations() {
        let req = AnalysisRequest {
            title: "Mandatory Vaccination".to_string(),
            body: VACCINATION_TEXT.to_string(),
            persona1: Persona::default().with_trait(TraitKind::Profession, "Doctor", sig(9)),
            persona2: None,
        };
        let outcome = generate(live_model(), req).await.unwrap();

        assert!(!outcome.report1.emotional_response.is_empty());
        for ki in &outcome.report1.key_interpretations {
            assert!(!ki.point.is_empty());
            assert!(!ki.interpretation.is_empty());
            assert!(!ki.reasoning.is_empty());
        }
    }

    #[tokio::test]
    #[ignore = "calls the live Gemini API"]
    async fn test_live_opposing_politics_produce_divergence_and_guidance() {
        let req = AnalysisRequest {
            title: "Mandatory Vaccination".to_string(),
            body: VACCINATION_TEXT.to_string(),
            persona1: Persona::default().with_trait(TraitKind::PoliticalView, "Progressive", sig(10)),
            persona2: Some(
                Persona::default().with_trait(TraitKind::PoliticalView, "Libertarian", sig(10)),
            ),
        };
        let outcome = generate(live_model(), req).await.unwrap();
        let comparison = outcome.comparison.unwrap();

        assert!(!comparison.divergence_points.is_empty());
        assert!(!comparison.dialogue_guidance.practical_steps.is_empty());
    }
}
