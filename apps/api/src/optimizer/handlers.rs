//! Axum route handlers for the Optimize API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::optimizer::input::{AliasedInput, OptimizedResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub input: AliasedInput,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub meta_prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimize
///
/// Runs the full pipeline. Unknown models and form-contract violations are rejected;
/// provider failures come back as a fallback result (`source: "fallback"`), never as an
/// error status.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizedResult>, AppError> {
    let result = state
        .optimizer
        .optimize(request.user_id, &request.input)
        .await?;

    Ok(Json(result))
}

/// POST /api/v1/optimize/preview
///
/// Returns the composed meta-prompt without calling the provider or saving a session.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(input): Json<AliasedInput>,
) -> Result<Json<PreviewResponse>, AppError> {
    let meta_prompt = state.optimizer.preview(&input)?;
    Ok(Json(PreviewResponse {
        meta_prompt: meta_prompt.into_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::normalizer::normalize;

    #[test]
    fn test_optimize_request_flattens_aliased_fields() {
        let json = serde_json::json!({
            "user_id": Uuid::nil(),
            "targetModelId": "gpt-4o",
            "raw_prompt": "Write release notes for v2.0",
            "successCriteria": ["mentions breaking changes", "under 300 words"],
            "max_tokens": 300
        });
        let request: OptimizeRequest = serde_json::from_value(json).unwrap();
        let input = normalize(&request.input);

        assert_eq!(request.user_id, Uuid::nil());
        assert_eq!(input.target_model_id, "gpt-4o");
        assert_eq!(input.raw_prompt, "Write release notes for v2.0");
        assert_eq!(
            input.success_criteria.as_deref(),
            Some("mentions breaking changes, under 300 words")
        );
        assert_eq!(input.response_length_tokens, 300);
    }
}
