// All prompt wording for the analysis module.
// Shared fragments (significance scale, schema-only directive) live in llm_client::prompts.

/// Role preamble for a single-persona analysis.
pub const SINGLE_PREAMBLE: &str = "You are an expert in sociology, psychology, and communication. \
    Your task is to analyze the provided text from the specific perspective of a person \
    with the following characteristics.";

/// Task description closing a single-persona prompt, before the schema directive.
pub const SINGLE_TASK: &str = "Based *only* on the persona provided, generate a detailed report. \
    The report must analyze how this person would likely interpret the text, identify potential \
    sensitivities or triggers, and predict their emotional response.";

/// Role preamble for the two-persona comparison.
pub const COMPARISON_PREAMBLE: &str = "You are an expert in comparative sociology, conflict \
    resolution, and intercultural communication. Your task is to analyze the same text from two \
    different perspectives and then create a comparative report.";

/// Task description closing a comparison prompt, before the schema directive.
pub const COMPARISON_TASK: &str = "Your report must identify points of convergence and divergence \
    in their interpretations. Crucially, provide actionable guidance for a third party on how to \
    facilitate a respectful and productive dialogue between these two individuals.";
