//! Local fallback — builds a usable `OptimizedResult` from the input alone when the
//! provider call fails. Pure: the same `InputRecord` always yields the same result.

use crate::optimizer::input::{InputRecord, OptimizedResult, ResultSource};
use crate::optimizer::normalizer::clean_text;
use crate::optimizer::prompts::{CONFLICT_ORDER, GENERIC_FORMAT_DIRECTIVE};

/// Synthesizes a template-based optimized prompt without any external call.
pub fn synthesize(input: &InputRecord) -> OptimizedResult {
    let domain = clean_text(input.domain_context.as_deref());
    let audience = clean_text(input.audience.as_deref())
        .unwrap_or_else(|| "a general audience".to_string());
    let style = clean_text(input.style.as_deref()).unwrap_or_else(|| "clear".to_string());
    let tone = clean_text(Some(input.tone.as_str())).unwrap_or_else(|| "professional".to_string());

    let role = match &domain {
        Some(domain) => format!("You are an experienced specialist in {domain}."),
        None => "You are an experienced specialist in the subject of this task.".to_string(),
    };

    let mut sections = vec![
        role,
        format!(
            "Your goal: {}",
            clean_text(Some(input.raw_prompt.as_str())).unwrap_or_else(|| "complete the task.".to_string())
        ),
        format!(
            "Audience: {audience}. Write in a {} tone with a {} style.",
            tone.to_lowercase(),
            style.to_lowercase()
        ),
    ];

    if let Some(constraints) = clean_text(input.hard_constraints.as_deref()) {
        sections.push(format!("Hard constraints (must never be violated): {constraints}."));
    }
    if let Some(prohibited) = clean_text(input.prohibited.as_deref()) {
        sections.push(format!("Do not include: {prohibited}."));
    }
    if let Some(criteria) = clean_text(input.success_criteria.as_deref()) {
        sections.push(format!("The answer succeeds when: {criteria}."));
    }
    if let Some(exemplars) = clean_text(input.exemplars.as_deref()) {
        sections.push(format!("Use these as reference examples: {exemplars}."));
    }

    sections.push(format!(
        "Process: first break the task into its parts, then draft, check the draft against the goal and constraints, and deliver the final answer. Aim for about {} tokens.",
        input.response_length_tokens
    ));
    sections.push(format!(
        "Output format: {}",
        clean_text(input.format_requirements.as_deref())
            .unwrap_or_else(|| GENERIC_FORMAT_DIRECTIVE.to_string())
    ));
    sections.push(format!(
        "If instructions conflict, follow this order: {CONFLICT_ORDER}."
    ));
    sections.push(
        "Close with 3-5 bullets summarizing your approach, without step-by-step internal reasoning."
            .to_string(),
    );

    OptimizedResult {
        optimized_prompt: sections.join("\n\n"),
        thought_process: vec![
            "Generated locally because the optimization service was unavailable.".to_string(),
            "Assigned an expert role from the domain context.".to_string(),
            "Carried audience, tone and style into explicit directives.".to_string(),
            "Added a decomposition step, a length target and a conflict-resolution order."
                .to_string(),
        ],
        input_checklist: input_checklist(input),
        raw_response: None,
        source: ResultSource::Fallback,
    }
}

/// Flags useful fields the user left unspecified, in fixed order.
pub fn input_checklist(input: &InputRecord) -> Vec<String> {
    let checks: [(&Option<String>, &str); 7] = [
        (&input.domain_context, "Add domain context to sharpen the expert role."),
        (&input.audience, "Specify the audience so vocabulary and depth fit."),
        (&input.style, "Choose a writing style."),
        (
            &input.format_requirements,
            "Describe the output format you need (e.g. table, JSON, outline).",
        ),
        (
            &input.hard_constraints,
            "List hard constraints such as word limits or must-include facts.",
        ),
        (
            &input.success_criteria,
            "State success criteria so the result can be checked.",
        ),
        (&input.exemplars, "Provide an example of the desired output."),
    ];
    checks
        .iter()
        .filter(|(value, _)| clean_text(value.as_deref()).is_none())
        .map(|(_, hint)| hint.to_string())
        .collect()
}
