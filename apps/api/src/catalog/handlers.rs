use axum::{extract::State, Json};
use serde::Serialize;

use crate::catalog::{SamplingCapabilities, FOCUS_LEVELS, STYLES, THINKING_DEPTHS, TONES};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub id: String,
    pub label: String,
    pub capabilities: SamplingCapabilities,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelSummary>,
    pub tones: &'static [&'static str],
    pub styles: &'static [&'static str],
    pub focus_levels: &'static [&'static str],
    pub thinking_depths: &'static [&'static str],
}

/// GET /api/v1/models
/// Lists supported target models and the closed form enumerations.
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = state
        .catalog
        .list()
        .into_iter()
        .map(|p| ModelSummary {
            id: p.id.clone(),
            label: p.label.clone(),
            capabilities: p.capabilities.clone(),
        })
        .collect();

    Json(ModelsResponse {
        models,
        tones: TONES,
        styles: STYLES,
        focus_levels: FOCUS_LEVELS,
        thinking_depths: THINKING_DEPTHS,
    })
}
