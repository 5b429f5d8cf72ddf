//! Persona formatter. Renders a persona as the canonical text block embedded in prompts.
//!
//! Output is deterministic: same persona, same bytes. Traits at the sentinel
//! or with an empty value are omitted entirely rather than emitted as placeholders.

use crate::persona::models::{Persona, PersonaTrait, TraitKind, SENTINEL};

/// Emitted when no trait qualifies, so a prompt never carries an empty persona section.
pub const NEUTRAL_PERSONA: &str =
    "A general, neutral persona with no specific demographic traits provided.";

pub fn format_persona(persona: &Persona) -> String {
    let lines: Vec<String> = persona
        .traits()
        .filter(|(kind, t)| is_present(*kind, t))
        .map(|(kind, t)| format_trait_line(kind, t))
        .collect();

    if lines.is_empty() {
        NEUTRAL_PERSONA.to_string()
    } else {
        lines.join("\n")
    }
}

/// Free text only needs a value; enumerated traits must also be off the sentinel.
fn is_present(kind: TraitKind, t: &PersonaTrait) -> bool {
    if t.value.is_empty() {
        return false;
    }
    kind.is_free_text() || t.value != SENTINEL
}

fn format_trait_line(kind: TraitKind, t: &PersonaTrait) -> String {
    format!(
        "- {}: {} (Significance: {}/10)",
        kind.display_name(),
        t.value,
        t.significance
    )
}
