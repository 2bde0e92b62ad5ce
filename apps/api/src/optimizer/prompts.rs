// Prompt constants for the optimizer.
// The three headings are the contract between composer.rs and parser.rs: change them together.

pub const HEADING_OPTIMIZED_PROMPT: &str = "## Optimized Prompt";
pub const HEADING_THOUGHT_PROCESS: &str = "## Brief Thought Process";
pub const HEADING_INPUT_CHECKLIST: &str = "## Input Checklist";

/// Ordered heading list, as the target model must emit them.
pub const REQUIRED_HEADINGS: [&str; 3] = [
    HEADING_OPTIMIZED_PROMPT,
    HEADING_THOUGHT_PROCESS,
    HEADING_INPUT_CHECKLIST,
];

/// Conflict precedence rendered verbatim into every meta-prompt.
pub const CONFLICT_ORDER: &str = "hard_constraints > safety/compliance > success_criteria > tone/style";

/// Literal rendered for any contextual field the user left empty.
pub const NONE_SENTINEL: &str = "none";

/// System instruction sent with every provider call.
pub const OPTIMIZER_SYSTEM: &str = "You are a senior prompt engineer. \
    You rewrite rough user instructions into precise, production-ready prompts for a specific target model. \
    Follow the REQUIRED OUTPUT CONTRACT in the user message exactly: \
    emit the three requested markdown sections in the stated order with the exact heading text. \
    Do NOT add any text before the first heading. \
    Do NOT wrap the answer in code fences. \
    Do NOT answer the user's raw prompt yourself.";

/// Used when the user gave no format requirements.
pub const GENERIC_FORMAT_DIRECTIVE: &str = "Use a clear structured format: a short intro, headings for \
    distinct parts, and bullet lists where they aid scanning.";

/// Meta-prompt body. Replace every `{placeholder}` before sending.
pub const META_PROMPT_TEMPLATE: &str = r#"You are an expert prompt engineer. Turn the user's raw instruction below into a single, polished prompt written specifically for {model_label}.

TARGET MODEL GUIDANCE
{model_guidance}

USER INPUTS
Raw prompt:
"""
{raw_prompt}
"""
{input_fields}

FACTORY SETTINGS (prose directives for the target model, not API parameters)
{factory_settings}

REQUIRED OUTPUT CONTRACT
Return exactly three top-level sections, in this order, with these exact headings and nothing before the first one:
{heading_optimized}
{heading_thought}
{heading_checklist}

OPTIMIZED PROMPT SECTION
Write the optimized prompt so that it contains these ten elements, in this order:
1. Role & goal: open by assigning {model_label} an expert role suited to the domain ({domain}) and state the goal in one sentence.
2. Inputs: enumerate the user's inputs as labelled items (domain, audience, constraints, success criteria, exemplars). Do not restate the raw prompt verbatim.
3. Planning: instruct the model to decompose the task into sub-problems before answering.{parallel_clause}
4. Process: instruct a five-step process: (1) clarify the objective, (2) gather the relevant facts from the inputs, (3) draft, (4) check the draft against the quality rubric, (5) deliver the final answer.
5. Output format: {output_format}
6. Approach summary: ask for a 3-5 bullet summary of the approach taken. Do not ask for step-by-step internal reasoning.
7. Quality rubric (internal, not printed): audience fit ({audience}); tone/style match ({tone} / {style}); brevity target (about {response_length} tokens); success criteria met ({success_criteria}); factual accuracy; safety.
8. Answer parameters: length target about {response_length} tokens; creativity {creativity}; focus {focus_level}; reasoning depth {thinking_depth}; tone/style {tone} / {style}.
9. Conflict resolution: when instructions conflict, resolve them in this order: {conflict_order}.
10. Safety: refuse or safely redirect requests that are harmful, deceptive or illegal, and never produce prohibited content ({prohibited}).

BRIEF THOUGHT PROCESS SECTION
3-5 bullets explaining the main choices you made while composing the optimized prompt.

INPUT CHECKLIST SECTION
Bullets naming inputs that were missing or underspecified and would improve the result if provided. Write "All key inputs provided" if nothing is missing.

Now produce exactly these sections, in this order: Optimized Prompt, Brief Thought Process, Input Checklist."#;
