//! Structured-output schemas for both report kinds.
//!
//! Each schema is a static declarative descriptor with two uses:
//! 1. rendered as Gemini's `responseSchema` to request constrained output, and
//! 2. checked locally against the parsed response before it is trusted.
//!
//! The provider's enforcement is not relied on: a payload that is valid JSON
//! but misses a required field or carries an out-of-enum value is rejected here.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::analysis::report::{Intensity, Severity};

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
    StringList,
    Object(&'static [Field]),
    ObjectList(&'static [Field]),
}

/// A report field. Every field is required; a `null` counts as missing.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

impl Field {
    const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

#[derive(Debug)]
pub struct ReportSchema {
    pub fields: &'static [Field],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("`{path}` should be {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("`{path}` is {value:?}, expected one of {allowed:?}")]
    NotInEnum {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Single-persona report
// ────────────────────────────────────────────────────────────────────────────

const KEY_INTERPRETATION_FIELDS: &[Field] = &[
    Field::required(
        "point",
        FieldKind::String,
        "A specific phrase or part of the text being interpreted.",
    ),
    Field::required(
        "interpretation",
        FieldKind::String,
        "How the persona interprets this point.",
    ),
    Field::required(
        "reasoning",
        FieldKind::String,
        "Why they interpret it this way based on their persona.",
    ),
];

const SENSITIVITY_FIELDS: &[Field] = &[
    Field::required(
        "sensitivity",
        FieldKind::String,
        "The sensitive topic or phrase.",
    ),
    Field::required(
        "potentialTrigger",
        FieldKind::String,
        "Why it might be a trigger for this persona.",
    ),
    Field::required(
        "severity",
        FieldKind::Enum(Severity::NAMES),
        "An estimation of the severity of the sensitivity.",
    ),
];

const EMOTION_FIELDS: &[Field] = &[
    Field::required(
        "emotion",
        FieldKind::String,
        "e.g., Anger, Joy, Confusion, Inspiration",
    ),
    Field::required(
        "intensity",
        FieldKind::Enum(Intensity::NAMES),
        "The intensity of the emotional reaction.",
    ),
    Field::required(
        "explanation",
        FieldKind::String,
        "Explanation for this emotional reaction based on the persona.",
    ),
];

pub static SINGLE_REPORT_SCHEMA: ReportSchema = ReportSchema {
    fields: &[
        Field::required(
            "summary",
            FieldKind::String,
            "A brief overview of the persona's likely reaction.",
        ),
        Field::required(
            "keyInterpretations",
            FieldKind::ObjectList(KEY_INTERPRETATION_FIELDS),
            "How the persona reads specific parts of the text.",
        ),
        Field::required(
            "potentialSensitivities",
            FieldKind::ObjectList(SENSITIVITY_FIELDS),
            "Topics or phrases that may be sensitive for this persona.",
        ),
        Field::required(
            "emotionalResponse",
            FieldKind::ObjectList(EMOTION_FIELDS),
            "The emotional reactions the persona is likely to have.",
        ),
        Field::required(
            "positiveAspects",
            FieldKind::StringList,
            "List of points the persona would likely agree with or find positive.",
        ),
        Field::required(
            "criticalQuestions",
            FieldKind::StringList,
            "Questions the persona might raise after reading the text.",
        ),
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Comparison report
// ────────────────────────────────────────────────────────────────────────────

const CONVERGENCE_FIELDS: &[Field] = &[
    Field::required("topic", FieldKind::String, "Topic or theme of agreement."),
    Field::required(
        "sharedView",
        FieldKind::String,
        "Description of the shared perspective between the two personas.",
    ),
];

const DIVERGENCE_FIELDS: &[Field] = &[
    Field::required("topic", FieldKind::String, "Topic or theme of disagreement."),
    Field::required(
        "persona1View",
        FieldKind::String,
        "Persona 1's perspective on the topic.",
    ),
    Field::required(
        "persona2View",
        FieldKind::String,
        "Persona 2's perspective on the topic.",
    ),
    Field::required(
        "underlyingReason",
        FieldKind::String,
        "The core reason for their differing views, based on their backgrounds.",
    ),
];

const DIALOGUE_GUIDANCE_FIELDS: &[Field] = &[
    Field::required(
        "principle",
        FieldKind::String,
        "A core guiding principle for constructive communication between these two personas.",
    ),
    Field::required(
        "practicalSteps",
        FieldKind::StringList,
        "Actionable advice or steps for a third party to facilitate good dialogue.",
    ),
];

pub static COMPARISON_REPORT_SCHEMA: ReportSchema = ReportSchema {
    fields: &[
        Field::required(
            "convergencePoints",
            FieldKind::ObjectList(CONVERGENCE_FIELDS),
            "Where the two personas' interpretations agree.",
        ),
        Field::required(
            "divergencePoints",
            FieldKind::ObjectList(DIVERGENCE_FIELDS),
            "Where the two personas' interpretations conflict.",
        ),
        Field::required(
            "dialogueGuidance",
            FieldKind::Object(DIALOGUE_GUIDANCE_FIELDS),
            "Guidance for a third party facilitating dialogue between the personas.",
        ),
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Rendering and validation
// ────────────────────────────────────────────────────────────────────────────

impl ReportSchema {
    /// Renders the schema in Gemini's OpenAPI-subset format.
    pub fn response_schema(&self) -> Value {
        object_schema(self.fields)
    }

    /// Checks a parsed payload against the schema. Unknown extra fields are ignored.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_object(self.fields, value, "")
    }
}

fn object_schema(fields: &[Field]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), field_schema(f)))
        .collect();
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(field: &Field) -> Value {
    let mut schema = match field.kind {
        FieldKind::String => json!({ "type": "STRING" }),
        FieldKind::Enum(allowed) => json!({ "type": "STRING", "enum": allowed }),
        FieldKind::StringList => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
        FieldKind::Object(fields) => object_schema(fields),
        FieldKind::ObjectList(fields) => json!({ "type": "ARRAY", "items": object_schema(fields) }),
    };
    schema["description"] = json!(field.description);
    schema
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn validate_object(fields: &[Field], value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Some(object) = value.as_object() else {
        return Err(SchemaViolation::WrongType {
            path: if path.is_empty() { "$".to_string() } else { path.to_string() },
            expected: "an object",
        });
    };

    for field in fields {
        let field_path = join_path(path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) => {
                return Err(SchemaViolation::MissingField { path: field_path });
            }
            Some(v) => validate_field(field.kind, v, &field_path)?,
        }
    }
    Ok(())
}

fn validate_field(kind: FieldKind, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    match kind {
        FieldKind::String => expect_str(value, path).map(|_| ()),
        FieldKind::Enum(allowed) => {
            let s = expect_str(value, path)?;
            if allowed.contains(&s) {
                Ok(())
            } else {
                Err(SchemaViolation::NotInEnum {
                    path: path.to_string(),
                    value: s.to_string(),
                    allowed,
                })
            }
        }
        FieldKind::StringList => {
            for (i, item) in expect_array(value, path)?.iter().enumerate() {
                expect_str(item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        FieldKind::Object(fields) => validate_object(fields, value, path),
        FieldKind::ObjectList(fields) => {
            for (i, item) in expect_array(value, path)?.iter().enumerate() {
                validate_object(fields, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
    }
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, SchemaViolation> {
    value.as_str().ok_or_else(|| SchemaViolation::WrongType {
        path: path.to_string(),
        expected: "a string",
    })
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaViolation> {
    value.as_array().ok_or_else(|| SchemaViolation::WrongType {
        path: path.to_string(),
        expected: "an array",
    })
}
