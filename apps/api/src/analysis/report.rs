//! Typed report objects produced from validated model output.
//!
//! Wire names are camelCase to match the response schemas sent to the model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two report shapes a request expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Single,
    Comparison,
}

impl ReportKind {
    /// End-user message when the model's payload does not match this report's schema.
    pub fn invalid_format_message(self) -> &'static str {
        match self {
            ReportKind::Single => "The AI returned an invalid report format.",
            ReportKind::Comparison => "The AI returned an invalid comparison report format.",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Single => f.write_str("single"),
            ReportKind::Comparison => f.write_str("comparison"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const NAMES: &'static [&'static str] = &["Low", "Medium", "High"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Mild,
    Moderate,
    Strong,
}

impl Intensity {
    pub const NAMES: &'static [&'static str] = &["Mild", "Moderate", "Strong"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInterpretation {
    pub point: String,
    pub interpretation: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensitivity {
    pub sensitivity: String,
    pub potential_trigger: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalReaction {
    pub emotion: String,
    pub intensity: Intensity,
    pub explanation: String,
}

/// One persona's interpretation of a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: String,
    pub key_interpretations: Vec<KeyInterpretation>,
    pub potential_sensitivities: Vec<Sensitivity>,
    pub emotional_response: Vec<EmotionalReaction>,
    pub positive_aspects: Vec<String>,
    pub critical_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergencePoint {
    pub topic: String,
    pub shared_view: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergencePoint {
    pub topic: String,
    #[serde(rename = "persona1View")]
    pub persona1_view: String,
    #[serde(rename = "persona2View")]
    pub persona2_view: String,
    pub underlying_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueGuidance {
    pub principle: String,
    pub practical_steps: Vec<String>,
}

/// Where two personas' readings of the same text agree and conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub convergence_points: Vec<ConvergencePoint>,
    pub divergence_points: Vec<DivergencePoint>,
    pub dialogue_guidance: DialogueGuidance,
}
