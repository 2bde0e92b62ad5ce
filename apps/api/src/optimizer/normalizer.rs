//! Field Normalizer — resolves aliased wire fields into one canonical `InputRecord`.
//!
//! Precedence for every field: newer name (if non-blank) > legacy name (if non-blank) > default.
//! Fields without a default stay absent; the composer renders absence as `none`.

use crate::optimizer::input::{AliasedInput, InputRecord, TextOrList};

pub const DEFAULT_TONE: &str = "Professional";
pub const DEFAULT_CREATIVITY: f64 = 0.7;
pub const DEFAULT_RESPONSE_LENGTH_TOKENS: u32 = 512;
pub const DEFAULT_FOCUS_LEVEL: &str = "Standard";
pub const DEFAULT_THINKING_DEPTH: &str = "Standard";

/// Separator used when a list-typed field is flattened to text.
pub const LIST_SEPARATOR: &str = ", ";

/// Resolves every aliased field. Total: never fails, never panics.
pub fn normalize(raw: &AliasedInput) -> InputRecord {
    InputRecord {
        target_model_id: pick_text(&raw.target_model_id, &raw.target_model_legacy)
            .unwrap_or_default(),
        raw_prompt: pick_text(&raw.raw_prompt, &raw.raw_prompt_legacy).unwrap_or_default(),
        domain_context: pick_text(&raw.domain_context, &raw.domain_context_legacy),
        audience: pick_text(&raw.audience, &raw.audience_legacy),
        tone: pick_text(&raw.tone, &raw.tone_legacy).unwrap_or_else(|| DEFAULT_TONE.to_string()),
        style: pick_text(&raw.style, &raw.style_legacy),
        format_requirements: pick_list(&raw.format_requirements, &raw.format_requirements_legacy),
        hard_constraints: pick_list(&raw.hard_constraints, &raw.hard_constraints_legacy),
        prohibited: pick_list(&raw.prohibited, &raw.prohibited_legacy),
        success_criteria: pick_list(&raw.success_criteria, &raw.success_criteria_legacy),
        exemplars: pick_list(&raw.exemplars, &raw.exemplars_legacy),
        creativity: pick_number(raw.creativity, raw.creativity_legacy)
            .unwrap_or(DEFAULT_CREATIVITY),
        response_length_tokens: raw
            .response_length_tokens
            .or(raw.response_length_tokens_legacy)
            .unwrap_or(DEFAULT_RESPONSE_LENGTH_TOKENS),
        focus_level: pick_text(&raw.focus_level, &raw.focus_level_legacy)
            .unwrap_or_else(|| DEFAULT_FOCUS_LEVEL.to_string()),
        thinking_depth: pick_text(&raw.thinking_depth, &raw.thinking_depth_legacy)
            .unwrap_or_else(|| DEFAULT_THINKING_DEPTH.to_string()),
        parallelization_enabled: raw
            .parallelization_enabled
            .or(raw.parallelization_enabled_legacy)
            .unwrap_or(false),
    }
}

/// Trims a free-text value; blank means absent.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn pick_text(new: &Option<String>, legacy: &Option<String>) -> Option<String> {
    clean_text(new.as_deref()).or_else(|| clean_text(legacy.as_deref()))
}

fn pick_list(new: &Option<TextOrList>, legacy: &Option<TextOrList>) -> Option<String> {
    new.as_ref()
        .and_then(flatten_list)
        .or_else(|| legacy.as_ref().and_then(flatten_list))
}

// NaN is treated as absent so the default applies.
fn pick_number(new: Option<f64>, legacy: Option<f64>) -> Option<f64> {
    new.filter(|v| v.is_finite())
        .or_else(|| legacy.filter(|v| v.is_finite()))
}

fn flatten_list(value: &TextOrList) -> Option<String> {
    match value {
        TextOrList::Text(text) => clean_text(Some(text)),
        TextOrList::List(items) => {
            let items: Vec<&str> = items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(items.join(LIST_SEPARATOR))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> AliasedInput {
        AliasedInput {
            target_model_id: Some("claude-sonnet-4".to_string()),
            raw_prompt: Some("  Write a blog post about AI  ".to_string()),
            domain_context: Some("Technology".to_string()),
            audience_legacy: Some("Developers".to_string()),
            hard_constraints: Some(TextOrList::List(vec![
                "under 800 words".to_string(),
                "  ".to_string(),
                "cite sources".to_string(),
            ])),
            exemplars_legacy: Some(TextOrList::Text("See the Rust blog".to_string())),
            creativity_legacy: Some(1.1),
            response_length_tokens: Some(900),
            thinking_depth_legacy: Some("Deep".to_string()),
            parallelization_enabled_legacy: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_name_wins_over_legacy_name() {
        let raw = AliasedInput {
            target_model_id: Some("gpt-4o".to_string()),
            target_model_legacy: Some("o3".to_string()),
            tone: Some("Friendly".to_string()),
            tone_legacy: Some("Formal".to_string()),
            creativity: Some(0.2),
            creativity_legacy: Some(1.5),
            success_criteria: Some(TextOrList::Text("new".to_string())),
            success_criteria_legacy: Some(TextOrList::Text("old".to_string())),
            ..Default::default()
        };
        let record = normalize(&raw);
        assert_eq!(record.target_model_id, "gpt-4o");
        assert_eq!(record.tone, "Friendly");
        assert_eq!(record.creativity, 0.2);
        assert_eq!(record.success_criteria.as_deref(), Some("new"));
    }

    #[test]
    fn test_blank_new_name_falls_back_to_legacy() {
        let raw = AliasedInput {
            domain_context: Some("   ".to_string()),
            domain_context_legacy: Some("Healthcare".to_string()),
            format_requirements: Some(TextOrList::List(vec![])),
            format_requirements_legacy: Some(TextOrList::Text("JSON".to_string())),
            ..Default::default()
        };
        let record = normalize(&raw);
        assert_eq!(record.domain_context.as_deref(), Some("Healthcare"));
        assert_eq!(record.format_requirements.as_deref(), Some("JSON"));
    }

    #[test]
    fn test_defaults_apply_when_both_names_absent() {
        let record = normalize(&AliasedInput::default());
        assert_eq!(record.tone, DEFAULT_TONE);
        assert_eq!(record.creativity, DEFAULT_CREATIVITY);
        assert_eq!(record.response_length_tokens, DEFAULT_RESPONSE_LENGTH_TOKENS);
        assert_eq!(record.focus_level, DEFAULT_FOCUS_LEVEL);
        assert_eq!(record.thinking_depth, DEFAULT_THINKING_DEPTH);
        assert!(!record.parallelization_enabled);
        assert!(record.target_model_id.is_empty());
        assert!(record.raw_prompt.is_empty());
    }

    #[test]
    fn test_absence_is_preserved_for_fields_without_default() {
        let record = normalize(&AliasedInput::default());
        assert!(record.domain_context.is_none());
        assert!(record.audience.is_none());
        assert!(record.style.is_none());
        assert!(record.hard_constraints.is_none());
        assert!(record.prohibited.is_none());
        assert!(record.exemplars.is_none());
    }

    #[test]
    fn test_list_fields_join_with_comma_and_drop_blank_items() {
        let record = normalize(&full_input());
        assert_eq!(
            record.hard_constraints.as_deref(),
            Some("under 800 words, cite sources")
        );
        assert_eq!(record.exemplars.as_deref(), Some("See the Rust blog"));
    }

    #[test]
    fn test_text_is_trimmed() {
        let record = normalize(&full_input());
        assert_eq!(record.raw_prompt, "Write a blog post about AI");
    }

    #[test]
    fn test_nan_creativity_uses_default() {
        let raw = AliasedInput {
            creativity: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(normalize(&raw).creativity, DEFAULT_CREATIVITY);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&full_input());
        let twice = normalize(&AliasedInput::from(once.clone()));
        assert_eq!(once, twice);

        let sparse = normalize(&AliasedInput::default());
        assert_eq!(normalize(&AliasedInput::from(sparse.clone())), sparse);
    }
}
