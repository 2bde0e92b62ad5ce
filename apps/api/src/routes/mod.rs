pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::optimizer::handlers as optimizer_handlers;
use crate::sessions::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/models", get(catalog_handlers::handle_list_models))
        // Optimize API
        .route("/api/v1/optimize", post(optimizer_handlers::handle_optimize))
        .route(
            "/api/v1/optimize/preview",
            post(optimizer_handlers::handle_preview),
        )
        // Session history API
        .route(
            "/api/v1/sessions",
            get(session_handlers::handle_list_sessions),
        )
        .route(
            "/api/v1/sessions/:id",
            delete(session_handlers::handle_delete_session),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::llm_client::{CompletionProvider, CompletionRequest, ProviderError};
    use crate::optimizer::orchestrator::{OptimizationOrchestrator, OrchestratorSettings};
    use crate::sessions::memory::MemorySessionStore;
    use crate::sessions::SessionStore;

    struct ScriptedProvider(Option<&'static str>);

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            self.0.map(str::to_string).ok_or(ProviderError::EmptyContent)
        }
    }

    fn app(reply: Option<&'static str>) -> (Router, Arc<dyn SessionStore>) {
        let catalog = Arc::new(StaticCatalog::builtin());
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let optimizer = Arc::new(OptimizationOrchestrator::new(
            catalog.clone(),
            Arc::new(ScriptedProvider(reply)),
            sessions.clone(),
            OrchestratorSettings {
                optimizer_model: "claude-sonnet-4-5".to_string(),
                max_tokens: 1024,
                provider_timeout: Duration::from_secs(5),
            },
        ));
        let state = AppState {
            catalog,
            optimizer,
            sessions: sessions.clone(),
        };
        (build_router(state), sessions)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_models_lists_catalog_and_enumerations() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            Request::get("/api/v1/models").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["models"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|m| m["id"].as_str())
            .collect();
        assert!(ids.contains(&"claude-sonnet-4"));
        assert_eq!(body["focus_levels"], json!(["Relaxed", "Standard", "Tight"]));
    }

    #[tokio::test]
    async fn test_optimize_returns_parsed_sections() {
        let reply = "## Optimized Prompt\nYou are a release manager.\n\
            ## Brief Thought Process\n- Added a role\n\
            ## Input Checklist\n- Audience missing";
        let (router, _) = app(Some(reply));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/optimize",
                json!({
                    "user_id": Uuid::new_v4(),
                    "target_model": "gpt-4o",
                    "raw_prompt": "Write release notes for v2.0"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["optimized_prompt"], "You are a release manager.");
        assert_eq!(body["source"], "provider");
        assert_eq!(body["input_checklist"], json!(["Audience missing"]));
    }

    #[tokio::test]
    async fn test_optimize_falls_back_when_provider_fails() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/optimize",
                json!({
                    "user_id": Uuid::new_v4(),
                    "targetModelId": "gemini-2.5-pro",
                    "rawPrompt": "Summarize the quarterly report"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert!(!body["optimized_prompt"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_unknown_model_is_404() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/optimize",
                json!({
                    "user_id": Uuid::new_v4(),
                    "targetModelId": "gpt-2",
                    "rawPrompt": "Summarize the quarterly report"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_MODEL");
    }

    #[tokio::test]
    async fn test_optimize_rejects_short_prompt() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/optimize",
                json!({
                    "user_id": Uuid::new_v4(),
                    "targetModelId": "gpt-4o",
                    "rawPrompt": "hi"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_returns_meta_prompt() {
        let (router, _) = app(None);
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/optimize/preview",
                json!({
                    "targetModelId": "claude-sonnet-4",
                    "rawPrompt": "Write a blog post about AI"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let meta_prompt = body["meta_prompt"].as_str().unwrap();
        assert!(meta_prompt.contains("Write a blog post about AI"));
        assert!(meta_prompt.contains("## Optimized Prompt"));
    }

    #[tokio::test]
    async fn test_sessions_are_listed_and_deleted_per_user() {
        let (router, sessions) = app(None);
        let user = Uuid::new_v4();
        let (status, _) = send(
            router.clone(),
            post_json(
                "/api/v1/optimize",
                json!({
                    "user_id": user,
                    "targetModelId": "gpt-4o",
                    "rawPrompt": "Draft an onboarding email"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Persistence is spawned; let it run.
        let mut saved = Vec::new();
        for _ in 0..50 {
            saved = sessions.list_for_user(user).await.unwrap();
            if !saved.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(saved.len(), 1);
        let id = saved[0].id;

        let (status, body) = send(
            router.clone(),
            Request::get(format!("/api/v1/sessions?user_id={user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Draft an onboarding email");

        let stranger = Uuid::new_v4();
        let (status, _) = send(
            router.clone(),
            Request::delete(format!("/api/v1/sessions/{id}?user_id={stranger}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            router,
            Request::delete(format!("/api/v1/sessions/{id}?user_id={user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(sessions.list_for_user(user).await.unwrap().is_empty());
    }
}
