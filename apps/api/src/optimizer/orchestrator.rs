//! Optimization Orchestrator — runs one submission end to end.
//!
//! Flow: normalize → resolve profile → validate → compose → provider call (with timeout) →
//!       parse | local fallback → spawn best-effort persistence → return.
//!
//! Only an unknown target model or a record outside the form contract fails the call.
//! Every failure after composition degrades to `fallback::synthesize`, so callers always
//! get a usable result.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{ModelProfile, ProfileCatalog};
use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, CompletionRequest, ProviderError};
use crate::optimizer::composer::{compose, ComposedMetaPrompt};
use crate::optimizer::fallback;
use crate::optimizer::input::{AliasedInput, InputRecord, OptimizedResult};
use crate::optimizer::normalizer::normalize;
use crate::optimizer::parser::parse;
use crate::optimizer::prompts::OPTIMIZER_SYSTEM;
use crate::optimizer::validation::validate;
use crate::sessions::{SessionRecord, SessionStore};

/// Upper bound of the optimizer model's temperature range.
const OPTIMIZER_MAX_TEMPERATURE: f64 = 1.0;

/// Per-submission state, logged as the pipeline advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Composing,
    AwaitingProvider,
    Parsing,
    FallingBack,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Composing => "composing",
            Stage::AwaitingProvider => "awaiting_provider",
            Stage::Parsing => "parsing",
            Stage::FallingBack => "falling_back",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Settings for the provider call made on behalf of every submission.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Model that performs the optimization (not the target model).
    pub optimizer_model: String,
    pub max_tokens: u32,
    pub provider_timeout: Duration,
}

pub struct OptimizationOrchestrator {
    catalog: Arc<dyn ProfileCatalog>,
    provider: Arc<dyn CompletionProvider>,
    sessions: Arc<dyn SessionStore>,
    settings: OrchestratorSettings,
}

impl OptimizationOrchestrator {
    pub fn new(
        catalog: Arc<dyn ProfileCatalog>,
        provider: Arc<dyn CompletionProvider>,
        sessions: Arc<dyn SessionStore>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            catalog,
            provider,
            sessions,
            settings,
        }
    }

    /// Normalizes, resolves and validates a raw submission, then optimizes it.
    ///
    /// Fails only with `UnknownModel` or `Validation`; everything after composition
    /// degrades to the local fallback.
    pub async fn optimize(
        &self,
        user_id: Uuid,
        raw: &AliasedInput,
    ) -> Result<OptimizedResult, AppError> {
        let input = normalize(raw);
        let profile = self.resolve(&input)?;
        validate(&input, profile)?;
        Ok(self.run(user_id, input, profile).await)
    }

    async fn run(&self, user_id: Uuid, input: InputRecord, profile: &ModelProfile) -> OptimizedResult {
        debug!(stage = %Stage::Composing, model = %profile.id, "Composing meta-prompt");
        let meta_prompt = compose(&input, profile);

        let result = match self.call_provider(&input, &meta_prompt).await {
            Ok(raw_text) => {
                debug!(stage = %Stage::Parsing, "Parsing provider response");
                let parsed = parse(&raw_text);
                if parsed.optimized_prompt.is_empty() {
                    warn!("Provider response had no usable prompt text; using local fallback");
                    self.fall_back(&input)
                } else {
                    parsed
                }
            }
            Err(e) => {
                warn!("Provider call failed ({e}); using local fallback");
                self.fall_back(&input)
            }
        };

        info!(
            stage = %Stage::Done,
            "Optimized prompt for user {} targeting {} (source={:?}, checklist={})",
            user_id,
            profile.id,
            result.source,
            result.input_checklist.len()
        );

        self.persist(user_id, input, result.clone());
        result
    }

    /// Composes the meta-prompt without calling the provider or persisting anything.
    /// A blank target model previews against the model-agnostic profile.
    pub fn preview(&self, raw: &AliasedInput) -> Result<ComposedMetaPrompt, AppError> {
        let input = normalize(raw);
        if input.target_model_id.is_empty() {
            return Ok(compose(&input, &ModelProfile::generic()));
        }
        let profile = self.resolve(&input)?;
        Ok(compose(&input, profile))
    }

    fn resolve(&self, input: &InputRecord) -> Result<&ModelProfile, AppError> {
        self.catalog
            .resolve(&input.target_model_id)
            .ok_or_else(|| AppError::UnknownModel(input.target_model_id.clone()))
    }

    async fn call_provider(
        &self,
        input: &InputRecord,
        meta_prompt: &ComposedMetaPrompt,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(input, meta_prompt);
        let timeout = self.settings.provider_timeout;

        debug!(stage = %Stage::AwaitingProvider, model = %request.model, "Calling provider");
        tokio::time::timeout(timeout, self.provider.complete(&request))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }

    fn build_request(&self, input: &InputRecord, meta_prompt: &ComposedMetaPrompt) -> CompletionRequest {
        CompletionRequest {
            prompt_text: meta_prompt.as_str().to_string(),
            system: OPTIMIZER_SYSTEM.to_string(),
            temperature: input.creativity.clamp(0.0, OPTIMIZER_MAX_TEMPERATURE),
            top_p: Some(top_p_for_focus(&input.focus_level)),
            max_tokens: self.settings.max_tokens,
            model: self.settings.optimizer_model.clone(),
        }
    }

    fn fall_back(&self, input: &InputRecord) -> OptimizedResult {
        debug!(stage = %Stage::FallingBack, "Synthesizing local fallback");
        fallback::synthesize(input)
    }

    /// Fire-and-forget save. Never awaited by the caller, never retried.
    fn persist(&self, user_id: Uuid, input: InputRecord, result: OptimizedResult) {
        let sessions = Arc::clone(&self.sessions);
        let record = SessionRecord::new(user_id, input, result);
        tokio::spawn(async move {
            let id = record.id;
            if let Err(e) = sessions.save(record).await {
                warn!("Failed to persist session {id}: {e}");
            }
        });
    }
}

/// Maps the focus label to nucleus sampling; unknown labels get the standard value.
pub fn top_p_for_focus(focus_level: &str) -> f64 {
    match focus_level.trim().to_ascii_lowercase().as_str() {
        "tight" => 0.8,
        "relaxed" => 0.95,
        _ => 0.9,
    }
}
