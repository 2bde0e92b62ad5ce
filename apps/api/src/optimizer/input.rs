//! Input and output records for the optimization pipeline.

use serde::{Deserialize, Serialize};

/// A list-typed field as it arrives from clients: a single string or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

/// Wire form of an optimize submission.
///
/// The schema grew two names for most fields: a legacy snake_case name and a newer
/// camelCase one. `normalizer::normalize` resolves each pair into an `InputRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasedInput {
    #[serde(rename = "targetModelId", default, skip_serializing_if = "Option::is_none")]
    pub target_model_id: Option<String>,
    #[serde(rename = "target_model", default, skip_serializing_if = "Option::is_none")]
    pub target_model_legacy: Option<String>,

    #[serde(rename = "rawPrompt", default, skip_serializing_if = "Option::is_none")]
    pub raw_prompt: Option<String>,
    #[serde(rename = "raw_prompt", default, skip_serializing_if = "Option::is_none")]
    pub raw_prompt_legacy: Option<String>,

    #[serde(rename = "domainContext", default, skip_serializing_if = "Option::is_none")]
    pub domain_context: Option<String>,
    #[serde(rename = "domain_context", default, skip_serializing_if = "Option::is_none")]
    pub domain_context_legacy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(rename = "target_audience", default, skip_serializing_if = "Option::is_none")]
    pub audience_legacy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(rename = "tone_of_voice", default, skip_serializing_if = "Option::is_none")]
    pub tone_legacy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(rename = "writing_style", default, skip_serializing_if = "Option::is_none")]
    pub style_legacy: Option<String>,

    #[serde(rename = "formatRequirements", default, skip_serializing_if = "Option::is_none")]
    pub format_requirements: Option<TextOrList>,
    #[serde(rename = "format_requirements", default, skip_serializing_if = "Option::is_none")]
    pub format_requirements_legacy: Option<TextOrList>,

    #[serde(rename = "hardConstraints", default, skip_serializing_if = "Option::is_none")]
    pub hard_constraints: Option<TextOrList>,
    #[serde(rename = "constraints", default, skip_serializing_if = "Option::is_none")]
    pub hard_constraints_legacy: Option<TextOrList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited: Option<TextOrList>,
    #[serde(rename = "prohibited_content", default, skip_serializing_if = "Option::is_none")]
    pub prohibited_legacy: Option<TextOrList>,

    #[serde(rename = "successCriteria", default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<TextOrList>,
    #[serde(rename = "success_criteria", default, skip_serializing_if = "Option::is_none")]
    pub success_criteria_legacy: Option<TextOrList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exemplars: Option<TextOrList>,
    #[serde(rename = "examples", default, skip_serializing_if = "Option::is_none")]
    pub exemplars_legacy: Option<TextOrList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creativity: Option<f64>,
    #[serde(rename = "temperature", default, skip_serializing_if = "Option::is_none")]
    pub creativity_legacy: Option<f64>,

    #[serde(rename = "responseLength", default, skip_serializing_if = "Option::is_none")]
    pub response_length_tokens: Option<u32>,
    #[serde(rename = "max_tokens", default, skip_serializing_if = "Option::is_none")]
    pub response_length_tokens_legacy: Option<u32>,

    #[serde(rename = "focusLevel", default, skip_serializing_if = "Option::is_none")]
    pub focus_level: Option<String>,
    #[serde(rename = "focus_level", default, skip_serializing_if = "Option::is_none")]
    pub focus_level_legacy: Option<String>,

    #[serde(rename = "thinkingDepth", default, skip_serializing_if = "Option::is_none")]
    pub thinking_depth: Option<String>,
    #[serde(rename = "reasoning_depth", default, skip_serializing_if = "Option::is_none")]
    pub thinking_depth_legacy: Option<String>,

    #[serde(rename = "parallelization", default, skip_serializing_if = "Option::is_none")]
    pub parallelization_enabled: Option<bool>,
    #[serde(
        rename = "enable_parallelization",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parallelization_enabled_legacy: Option<bool>,
}

/// Canonical, alias-free input consumed by the composer and the fallback synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub target_model_id: String,
    pub raw_prompt: String,
    pub domain_context: Option<String>,
    pub audience: Option<String>,
    pub tone: String,
    pub style: Option<String>,
    pub format_requirements: Option<String>,
    pub hard_constraints: Option<String>,
    pub prohibited: Option<String>,
    pub success_criteria: Option<String>,
    pub exemplars: Option<String>,
    pub creativity: f64,
    pub response_length_tokens: u32,
    pub focus_level: String,
    pub thinking_depth: String,
    pub parallelization_enabled: bool,
}

/// Re-expresses a canonical record using only the newer field names.
impl From<InputRecord> for AliasedInput {
    fn from(record: InputRecord) -> Self {
        AliasedInput {
            target_model_id: Some(record.target_model_id),
            raw_prompt: Some(record.raw_prompt),
            domain_context: record.domain_context,
            audience: record.audience,
            tone: Some(record.tone),
            style: record.style,
            format_requirements: record.format_requirements.map(TextOrList::Text),
            hard_constraints: record.hard_constraints.map(TextOrList::Text),
            prohibited: record.prohibited.map(TextOrList::Text),
            success_criteria: record.success_criteria.map(TextOrList::Text),
            exemplars: record.exemplars.map(TextOrList::Text),
            creativity: Some(record.creativity),
            response_length_tokens: Some(record.response_length_tokens),
            focus_level: Some(record.focus_level),
            thinking_depth: Some(record.thinking_depth),
            parallelization_enabled: Some(record.parallelization_enabled),
            ..Default::default()
        }
    }
}

/// Which path produced an `OptimizedResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Provider,
    Fallback,
}

/// The user-facing output of one optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedResult {
    pub optimized_prompt: String,
    pub thought_process: Vec<String>,
    pub input_checklist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    pub source: ResultSource,
}
