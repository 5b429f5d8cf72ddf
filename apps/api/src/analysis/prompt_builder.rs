//! Prompt Builder. Assembles the two task prompts from formatted personas, title and body.
//!
//! Pure string assembly: no I/O, and identical inputs always produce identical bytes.
//! Title and body are embedded verbatim; an empty title yields `Title: ""`.

use crate::analysis::prompts::{
    COMPARISON_PREAMBLE, COMPARISON_TASK, SINGLE_PREAMBLE, SINGLE_TASK,
};
use crate::llm_client::prompts::{SCHEMA_ONLY_DIRECTIVE, SIGNIFICANCE_SCALE};
use crate::persona::formatter::format_persona;
use crate::persona::models::Persona;

/// Builds the single-perspective analysis prompt.
pub fn build_single_prompt(title: &str, body: &str, persona: &Persona) -> String {
    format!(
        "{SINGLE_PREAMBLE}\n\n\
         **Persona Details:**\n\
         {persona}\n\n\
         **Important:** Pay close attention to the significance score (0-10) for each trait. {SIGNIFICANCE_SCALE}\n\n\
         {text}\n\n\
         {SINGLE_TASK} {SCHEMA_ONLY_DIRECTIVE}",
        persona = format_persona(persona),
        text = text_section(title, body),
    )
}

/// Builds the dual-perspective comparison prompt.
pub fn build_comparison_prompt(
    title: &str,
    body: &str,
    persona1: &Persona,
    persona2: &Persona,
) -> String {
    format!(
        "{COMPARISON_PREAMBLE}\n\n\
         **Important:** For each persona, pay close attention to the significance score (0-10) for each trait. {SIGNIFICANCE_SCALE}\n\n\
         {text}\n\n\
         **Persona 1 Details:**\n\
         {persona1}\n\n\
         **Persona 2 Details:**\n\
         {persona2}\n\n\
         {COMPARISON_TASK} {SCHEMA_ONLY_DIRECTIVE}",
        text = text_section(title, body),
        persona1 = format_persona(persona1),
        persona2 = format_persona(persona2),
    )
}

fn text_section(title: &str, body: &str) -> String {
    format!("**Text to Analyze:**\nTitle: \"{title}\"\nBody: \"{body}\"")
}
