//! Meta-Prompt Composer — canonical input + model profile → the instruction document
//! sent to the completion provider.
//!
//! Pure and deterministic: no I/O, no clock, no randomness. The composed text always
//! carries the three headings from `prompts::REQUIRED_HEADINGS`, each exactly once.

use std::fmt;

use crate::catalog::ModelProfile;
use crate::optimizer::input::InputRecord;
use crate::optimizer::normalizer::clean_text;
use crate::optimizer::prompts::{
    CONFLICT_ORDER, GENERIC_FORMAT_DIRECTIVE, HEADING_INPUT_CHECKLIST, HEADING_OPTIMIZED_PROMPT,
    HEADING_THOUGHT_PROCESS, META_PROMPT_TEMPLATE, NONE_SENTINEL,
};

/// Formatted meta-prompt text. Immutable once composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMetaPrompt(String);

impl ComposedMetaPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedMetaPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composes the meta-prompt for `input` targeting the model described by `profile`.
///
/// Unknown-model handling happens in the orchestrator; this function always has a profile.
pub fn compose(input: &InputRecord, profile: &ModelProfile) -> ComposedMetaPrompt {
    let input = &escape_user_headings(input);
    let guidance = render_guidance(profile);
    let input_fields = render_input_fields(input);
    let factory_settings = render_factory_settings(input);
    let domain = or_none(input.domain_context.as_ref());
    let audience = or_none(input.audience.as_ref());
    let tone = or_none(Some(&input.tone));
    let style = or_none(input.style.as_ref());
    let success_criteria = or_none(input.success_criteria.as_ref());
    let prohibited = or_none(input.prohibited.as_ref());
    let focus_level = or_none(Some(&input.focus_level));
    let thinking_depth = or_none(Some(&input.thinking_depth));
    let response_length = input.response_length_tokens.to_string();
    let creativity = input.creativity.to_string();
    let output_format = clean_text(input.format_requirements.as_deref())
        .unwrap_or_else(|| GENERIC_FORMAT_DIRECTIVE.to_string());
    let parallel_clause = if input.parallelization_enabled {
        " Independent sub-problems may be worked in parallel and merged at the end."
    } else {
        " Work through sub-problems sequentially."
    };

    let values: [(&str, &str); 21] = [
        ("model_label", profile.label.as_str()),
        ("model_guidance", guidance.as_str()),
        ("raw_prompt", input.raw_prompt.trim()),
        ("input_fields", input_fields.as_str()),
        ("factory_settings", factory_settings.as_str()),
        ("heading_optimized", HEADING_OPTIMIZED_PROMPT),
        ("heading_thought", HEADING_THOUGHT_PROCESS),
        ("heading_checklist", HEADING_INPUT_CHECKLIST),
        ("domain", domain.as_str()),
        ("parallel_clause", parallel_clause),
        ("output_format", output_format.as_str()),
        ("audience", audience.as_str()),
        ("tone", tone.as_str()),
        ("style", style.as_str()),
        ("response_length", response_length.as_str()),
        ("success_criteria", success_criteria.as_str()),
        ("creativity", creativity.as_str()),
        ("focus_level", focus_level.as_str()),
        ("thinking_depth", thinking_depth.as_str()),
        ("conflict_order", CONFLICT_ORDER),
        ("prohibited", prohibited.as_str()),
    ];
    let text = fill_template(META_PROMPT_TEMPLATE, &values);

    ComposedMetaPrompt(text)
}

/// Header block: target label plus the profile's notes. Absent notes produce no line at all.
fn render_guidance(profile: &ModelProfile) -> String {
    let mut lines = vec![
        format!("Target Model: {}", profile.label),
        format!("System Role: {}", profile.system_role),
        format!("Sampling: {}", profile.sampling_tips),
        format!("Structuring: {}", profile.structuring_tips),
    ];
    if let Some(tool_calling) = clean_text(profile.tool_calling.as_deref()) {
        lines.push(format!("Tool Calling: {tool_calling}"));
    }
    if let Some(safety) = clean_text(profile.safety.as_deref()) {
        lines.push(format!("Safety: {safety}"));
    }
    if !profile.prohibitions.is_empty() {
        lines.push("Avoid:".to_string());
        lines.extend(profile.prohibitions.iter().map(|p| format!("- {p}")));
    }
    lines.join("\n")
}

fn render_input_fields(input: &InputRecord) -> String {
    let fields: [(&str, Option<&String>); 9] = [
        ("Domain/Context", input.domain_context.as_ref()),
        ("Audience", input.audience.as_ref()),
        ("Tone", Some(&input.tone)),
        ("Style", input.style.as_ref()),
        ("Format Requirements", input.format_requirements.as_ref()),
        ("Hard Constraints", input.hard_constraints.as_ref()),
        ("Prohibited", input.prohibited.as_ref()),
        ("Success Criteria", input.success_criteria.as_ref()),
        ("Exemplars", input.exemplars.as_ref()),
    ];
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {}", or_none(*value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_factory_settings(input: &InputRecord) -> String {
    let parallelization = if input.parallelization_enabled {
        "Enabled (split independent sub-tasks and combine the results)"
    } else {
        "Disabled (work through the task sequentially)"
    };
    [
        format!(
            "Creativity: {} (0 = literal and predictable, 2 = highly inventive)",
            input.creativity
        ),
        format!(
            "Response Length: about {} tokens (stay close to this target)",
            input.response_length_tokens
        ),
        format!(
            "Focus Level: {} (higher = tighter, fewer tangents)",
            or_none(Some(&input.focus_level))
        ),
        format!(
            "Thinking Depth: {} (deeper = more deliberate analysis before answering)",
            or_none(Some(&input.thinking_depth))
        ),
        format!("Parallelization: {parallelization}"),
    ]
    .join("\n")
}

/// Copy of `input` whose free-text fields cannot open a markdown heading, so the
/// template's own headings stay unique.
fn escape_user_headings(input: &InputRecord) -> InputRecord {
    let escape = |value: &Option<String>| value.as_deref().map(escape_heading_lines);
    InputRecord {
        raw_prompt: escape_heading_lines(&input.raw_prompt),
        domain_context: escape(&input.domain_context),
        audience: escape(&input.audience),
        tone: escape_heading_lines(&input.tone),
        style: escape(&input.style),
        format_requirements: escape(&input.format_requirements),
        hard_constraints: escape(&input.hard_constraints),
        prohibited: escape(&input.prohibited),
        success_criteria: escape(&input.success_criteria),
        exemplars: escape(&input.exemplars),
        focus_level: escape_heading_lines(&input.focus_level),
        thinking_depth: escape_heading_lines(&input.thinking_depth),
        ..input.clone()
    }
}

/// Backslash-escapes the leading `#` run of every line that would render as a heading.
fn escape_heading_lines(text: &str) -> String {
    if !text.contains('#') {
        return text.to_string();
    }
    text.lines()
        .map(|line| {
            let body = line.trim_start();
            let hashes = body.chars().take_while(|&c| c == '#').count();
            if hashes == 0 {
                return line.to_string();
            }
            let indent = &line[..line.len() - body.len()];
            format!("{indent}{}{}", "\\#".repeat(hashes), &body[hashes..])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Field value or the `none` sentinel. Whitespace-only counts as absent.
fn or_none(value: Option<&String>) -> String {
    clean_text(value.map(String::as_str)).unwrap_or_else(|| NONE_SENTINEL.to_string())
}

/// Single-pass `{key}` substitution. Substituted values are never re-scanned, so user
/// text containing braces passes through untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
