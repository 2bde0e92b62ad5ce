//! Model Profile Catalog — target-model identifier → guidance notes and sampling capabilities.
//!
//! Profiles are data, not code: the built-in set lives in `profiles.rs` and can be
//! replaced wholesale by a JSON file (`MODEL_CATALOG_PATH`) without touching the composer.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod handlers;
pub mod profiles;

/// Tones accepted by the optimize form.
pub const TONES: &[&str] = &[
    "Professional",
    "Casual",
    "Friendly",
    "Formal",
    "Technical",
    "Persuasive",
    "Academic",
    "Conversational",
];

/// Writing styles accepted by the optimize form.
pub const STYLES: &[&str] = &[
    "Concise",
    "Detailed",
    "Narrative",
    "Step-by-step",
    "Bullet points",
    "Socratic",
];

/// Focus levels, loosest first.
pub const FOCUS_LEVELS: &[&str] = &["Relaxed", "Standard", "Tight"];

/// Reasoning depth labels, shallowest first.
pub const THINKING_DEPTHS: &[&str] = &["Quick", "Standard", "Deep", "Exhaustive"];

/// Sampling-parameter capabilities of a target model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingCapabilities {
    pub max_output_tokens: u32,
    pub max_temperature: f64,
    pub supports_top_p: bool,
}

/// Static guidance describing how a target model responds best to instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub id: String,
    pub label: String,
    pub system_role: String,
    pub sampling_tips: String,
    pub structuring_tips: String,
    #[serde(default)]
    pub tool_calling: Option<String>,
    #[serde(default)]
    pub safety: Option<String>,
    #[serde(default)]
    pub prohibitions: Vec<String>,
    pub capabilities: SamplingCapabilities,
}

impl ModelProfile {
    /// Model-agnostic profile used when composing without a catalog entry.
    pub fn generic() -> Self {
        profiles::generic_profile()
    }
}

/// Read-only lookup of target-model profiles.
///
/// Carried in `AppState` and the orchestrator as `Arc<dyn ProfileCatalog>`.
pub trait ProfileCatalog: Send + Sync {
    fn resolve(&self, id: &str) -> Option<&ModelProfile>;

    /// All profiles in display order.
    fn list(&self) -> Vec<&ModelProfile>;
}

/// In-memory catalog, loaded once at process start and never mutated.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    order: Vec<String>,
    profiles: HashMap<String, ModelProfile>,
}

impl StaticCatalog {
    pub fn new(profiles: Vec<ModelProfile>) -> Self {
        let order = profiles.iter().map(|p| p.id.clone()).collect();
        let profiles = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { order, profiles }
    }

    pub fn builtin() -> Self {
        Self::new(profiles::builtin_profiles())
    }

    /// Loads a catalog from a JSON array of profiles.
    pub fn from_json(json: &str) -> Result<Self> {
        let profiles: Vec<ModelProfile> =
            serde_json::from_str(json).context("Model catalog must be a JSON array of profiles")?;
        if profiles.is_empty() {
            anyhow::bail!("Model catalog is empty");
        }
        Ok(Self::new(profiles))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model catalog at {}", path.display()))?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded {} model profiles from {}",
            catalog.order.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl ProfileCatalog for StaticCatalog {
    fn resolve(&self, id: &str) -> Option<&ModelProfile> {
        self.profiles.get(id.trim())
    }

    fn list(&self) -> Vec<&ModelProfile> {
        self.order
            .iter()
            .filter_map(|id| self.profiles.get(id))
            .collect()
    }
}

/// Case-insensitive membership check against one of the closed enumerations above.
pub fn is_allowed(options: &[&str], value: &str) -> bool {
    options.iter().any(|o| o.eq_ignore_ascii_case(value.trim()))
}
