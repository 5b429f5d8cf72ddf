use std::sync::Arc;

use crate::llm_client::StructuredGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model access. Default: the Gemini `LlmClient`; tests swap in a fake.
    pub model: Arc<dyn StructuredGenerator>,
}
