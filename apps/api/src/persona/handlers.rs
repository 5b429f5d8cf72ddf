//! Axum route handlers for the Persona API.

use axum::Json;
use serde::Serialize;

use crate::persona::catalog::{options, tooltip};
use crate::persona::models::{Persona, TraitKind, SENTINEL};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitOptions {
    pub key: &'static str,
    pub display_name: &'static str,
    pub tooltip: &'static str,
    /// `None` for the free-text `other` trait.
    pub options: Option<&'static [&'static str]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaOptionsResponse {
    pub sentinel: &'static str,
    pub traits: Vec<TraitOptions>,
    pub default_persona: Persona,
}

/// GET /api/v1/personas/options
///
/// Everything the persona builder needs to render its inputs.
pub async fn handle_persona_options() -> Json<PersonaOptionsResponse> {
    let traits = TraitKind::ALL
        .into_iter()
        .map(|kind| TraitOptions {
            key: kind.key(),
            display_name: kind.display_name(),
            tooltip: tooltip(kind),
            options: options(kind),
        })
        .collect();

    Json(PersonaOptionsResponse {
        sentinel: SENTINEL,
        traits,
        default_persona: Persona::default(),
    })
}
