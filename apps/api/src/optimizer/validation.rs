//! Form contract checks run at the HTTP boundary, after normalization and model resolution.
//! The composer itself accepts any `InputRecord`.

use crate::catalog::{is_allowed, ModelProfile, FOCUS_LEVELS, STYLES, THINKING_DEPTHS, TONES};
use crate::errors::AppError;
use crate::optimizer::input::InputRecord;

pub const MIN_PROMPT_CHARS: usize = 10;
pub const MAX_CREATIVITY: f64 = 2.0;

/// Validates a normalized record against the form contract for the resolved target model.
pub fn validate(input: &InputRecord, profile: &ModelProfile) -> Result<(), AppError> {
    let prompt_chars = input.raw_prompt.trim().chars().count();
    if prompt_chars < MIN_PROMPT_CHARS {
        return Err(AppError::Validation(format!(
            "rawPrompt must be at least {MIN_PROMPT_CHARS} characters (got {prompt_chars})"
        )));
    }

    if !(0.0..=MAX_CREATIVITY).contains(&input.creativity) {
        return Err(AppError::Validation(format!(
            "creativity must be between 0 and {MAX_CREATIVITY} (got {})",
            input.creativity
        )));
    }

    let max_tokens = profile.capabilities.max_output_tokens;
    if input.response_length_tokens == 0 || input.response_length_tokens > max_tokens {
        return Err(AppError::Validation(format!(
            "responseLength must be between 1 and {max_tokens} for {} (got {})",
            profile.label, input.response_length_tokens
        )));
    }

    check_choice("tone", &input.tone, TONES)?;
    if let Some(style) = &input.style {
        check_choice("style", style, STYLES)?;
    }
    check_choice("focusLevel", &input.focus_level, FOCUS_LEVELS)?;
    check_choice("thinkingDepth", &input.thinking_depth, THINKING_DEPTHS)?;

    Ok(())
}

fn check_choice(field: &str, value: &str, options: &[&str]) -> Result<(), AppError> {
    if is_allowed(options, value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} '{value}' is not one of: {}",
            options.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProfileCatalog, StaticCatalog};
    use crate::optimizer::input::AliasedInput;
    use crate::optimizer::normalizer::normalize;

    fn valid_input() -> InputRecord {
        normalize(&AliasedInput {
            target_model_id: Some("llama-3.1-70b".to_string()),
            raw_prompt: Some("Summarize this contract for a founder".to_string()),
            style: Some("concise".to_string()),
            ..Default::default()
        })
    }

    fn llama() -> ModelProfile {
        StaticCatalog::builtin()
            .resolve("llama-3.1-70b")
            .cloned()
            .unwrap()
    }

    fn assert_invalid(input: &InputRecord) {
        assert!(matches!(
            validate(input, &llama()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&valid_input(), &llama()).is_ok());
    }

    #[test]
    fn test_short_prompt_rejected() {
        let mut input = valid_input();
        input.raw_prompt = "Too short".to_string();
        assert_invalid(&input);
    }

    #[test]
    fn test_creativity_out_of_range_rejected() {
        let mut input = valid_input();
        input.creativity = 2.5;
        assert_invalid(&input);
        input.creativity = -0.1;
        assert_invalid(&input);
    }

    #[test]
    fn test_response_length_bounded_by_model_max() {
        let mut input = valid_input();
        input.response_length_tokens = 8192;
        assert!(validate(&input, &llama()).is_ok());
        input.response_length_tokens = 8193;
        assert_invalid(&input);
        input.response_length_tokens = 0;
        assert_invalid(&input);
    }

    #[test]
    fn test_unknown_tone_rejected() {
        let mut input = valid_input();
        input.tone = "Sarcastic".to_string();
        assert_invalid(&input);
    }

    #[test]
    fn test_unknown_thinking_depth_rejected() {
        let mut input = valid_input();
        input.thinking_depth = "Bottomless".to_string();
        assert_invalid(&input);
    }
}
