// Shared prompt fragments used by every report prompt.
// Task-specific wording lives in analysis/prompts.rs.

/// How the model must weigh trait significance scores.
pub const SIGNIFICANCE_SCALE: &str = "A score of 10 means the trait is a core part of their identity \
    and heavily influences their worldview, while a score of 0 means it is not significant at all. \
    Your analysis MUST reflect the varying importance of these traits.";

/// Closing directive appended to all structured-output prompts.
pub const SCHEMA_ONLY_DIRECTIVE: &str = "Adhere strictly to the provided JSON schema for your response. \
    Do not add any explanatory text before or after the JSON object.";
