// Trait model, option catalog and prompt formatting for personas.
// Personas are request-scoped values: nothing here is persisted.

pub mod catalog;
pub mod formatter;
pub mod handlers;
pub mod models;
