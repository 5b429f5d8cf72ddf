// Persona analysis: prompt building, structured-output schemas, report
// requests and the single/dual-persona orchestration.
// All model calls go through llm_client; no direct Gemini calls here.

pub mod handlers;
pub mod orchestrator;
pub mod prompt_builder;
pub mod prompts;
pub mod report;
pub mod requestor;
pub mod schema;
