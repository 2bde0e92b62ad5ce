// Built-in target-model profiles. Guidance text is rendered verbatim into meta-prompts.

use super::{ModelProfile, SamplingCapabilities};

fn caps(max_output_tokens: u32, max_temperature: f64, supports_top_p: bool) -> SamplingCapabilities {
    SamplingCapabilities {
        max_output_tokens,
        max_temperature,
        supports_top_p,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn generic_profile() -> ModelProfile {
    ModelProfile {
        id: "generic".to_string(),
        label: "Generic LLM".to_string(),
        system_role: "Open with a single sentence that assigns the model a clear expert role and goal."
            .to_string(),
        sampling_tips: "Prefer moderate temperature (0.5-0.8) for writing and low temperature (0-0.3) for extraction or code."
            .to_string(),
        structuring_tips: "Separate instructions, context and expected output with clear headings or delimiters."
            .to_string(),
        tool_calling: None,
        safety: None,
        prohibitions: strings(&["Do not ask the model to reveal hidden reasoning."]),
        capabilities: caps(4096, 2.0, true),
    }
}

pub fn builtin_profiles() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "gpt-4o".to_string(),
            label: "GPT-4o".to_string(),
            system_role: "Put durable behavior in a system message; state the persona, audience and deliverable in the first lines."
                .to_string(),
            sampling_tips: "Temperature 0.7 suits drafting; drop to 0.2 for factual or structured output. Adjust temperature or top_p, not both."
                .to_string(),
            structuring_tips: "Markdown headings and numbered steps are followed reliably; ask for JSON only with an explicit schema."
                .to_string(),
            tool_calling: Some(
                "Describe each tool with a precise name, purpose and JSON parameter schema; tell the model when NOT to call tools."
                    .to_string(),
            ),
            safety: None,
            prohibitions: strings(&[
                "Do not ask for chain-of-thought in the final answer.",
                "Do not rely on knowledge of events after the training cutoff.",
            ]),
            capabilities: caps(16384, 2.0, true),
        },
        ModelProfile {
            id: "gpt-4.1".to_string(),
            label: "GPT-4.1".to_string(),
            system_role: "GPT-4.1 follows instructions literally: state every expectation explicitly rather than implying it."
                .to_string(),
            sampling_tips: "Keep temperature between 0.2 and 0.7; long-context tasks benefit from the lower end."
                .to_string(),
            structuring_tips: "Place instructions both before and after long context blocks; use XML tags or markdown to delimit sections."
                .to_string(),
            tool_calling: Some(
                "Prefer native tool definitions over describing tools in prose; include usage examples in the tool description."
                    .to_string(),
            ),
            safety: None,
            prohibitions: strings(&["Do not leave output format implicit."]),
            capabilities: caps(32768, 2.0, true),
        },
        ModelProfile {
            id: "o3".to_string(),
            label: "OpenAI o3".to_string(),
            system_role: "Reasoning model: give a goal and success criteria instead of step-by-step instructions on how to think."
                .to_string(),
            sampling_tips: "Sampling parameters are fixed by the provider; control depth through reasoning effort instead."
                .to_string(),
            structuring_tips: "Keep prompts short and direct; delimit inputs clearly and state the final output format."
                .to_string(),
            tool_calling: Some(
                "The model plans tool use on its own; list available tools and the constraints on their use."
                    .to_string(),
            ),
            safety: None,
            prohibitions: strings(&[
                "Do not instruct the model to think step by step.",
                "Do not request the model's internal reasoning.",
            ]),
            capabilities: caps(100000, 1.0, false),
        },
        ModelProfile {
            id: "claude-sonnet-4".to_string(),
            label: "Claude Sonnet 4".to_string(),
            system_role: "Give Claude a role in the system prompt and explain the context and motivation behind each instruction."
                .to_string(),
            sampling_tips: "Temperature 0.0-1.0; use ~0.3 for analytical work and ~0.8 for creative work."
                .to_string(),
            structuring_tips: "Wrap inputs and examples in XML tags such as <context>, <examples> and <instructions>; ask for output inside named tags when it must be parsed."
                .to_string(),
            tool_calling: Some(
                "Describe tools with detailed descriptions; Claude can call independent tools in parallel when told it may."
                    .to_string(),
            ),
            safety: Some(
                "Claude declines harmful requests; state legitimate intent and audience up front to avoid over-refusal."
                    .to_string(),
            ),
            prohibitions: strings(&[
                "Do not use all-caps emphasis or threats to force compliance.",
                "Do not prefill the response with content the user did not request.",
            ]),
            capabilities: caps(64000, 1.0, true),
        },
        ModelProfile {
            id: "claude-opus-4".to_string(),
            label: "Claude Opus 4".to_string(),
            system_role: "Frame Claude as a senior expert collaborator; long, detailed context improves results on complex tasks."
                .to_string(),
            sampling_tips: "Temperature 0.0-1.0; prefer lower values for multi-step agentic work."
                .to_string(),
            structuring_tips: "Use XML tags to separate documents from instructions and put long documents before the question."
                .to_string(),
            tool_calling: Some(
                "Allow extended thinking between tool calls for multi-step tasks; describe expected tool outputs."
                    .to_string(),
            ),
            safety: Some(
                "State the legitimate purpose for sensitive domains such as security or medicine."
                    .to_string(),
            ),
            prohibitions: strings(&["Do not pad the prompt with redundant politeness."]),
            capabilities: caps(32000, 1.0, true),
        },
        ModelProfile {
            id: "gemini-2.5-pro".to_string(),
            label: "Gemini 2.5 Pro".to_string(),
            system_role: "Use a system instruction for persona and rules; keep the user turn focused on the task."
                .to_string(),
            sampling_tips: "Default temperature 1.0 works well; lower it for deterministic extraction."
                .to_string(),
            structuring_tips: "Few-shot examples strongly shape output format; keep examples consistent in structure."
                .to_string(),
            tool_calling: Some(
                "Declare functions with OpenAPI-style schemas; set the function-calling mode explicitly when a call is required."
                    .to_string(),
            ),
            safety: Some(
                "Safety filters may block borderline content; state the intended audience and use case.".to_string(),
            ),
            prohibitions: strings(&["Do not mix several unrelated tasks in one prompt."]),
            capabilities: caps(65536, 2.0, true),
        },
        ModelProfile {
            id: "gemini-2.5-flash".to_string(),
            label: "Gemini 2.5 Flash".to_string(),
            system_role: "State the task and the expected output in the first sentence; Flash rewards directness."
                .to_string(),
            sampling_tips: "Use temperature 0.4-0.9; keep responses short to benefit from low latency."
                .to_string(),
            structuring_tips: "Prefer short bullet lists and explicit length limits.".to_string(),
            tool_calling: None,
            safety: None,
            prohibitions: strings(&["Do not request very long multi-part deliverables in one call."]),
            capabilities: caps(65536, 2.0, true),
        },
        ModelProfile {
            id: "llama-3.1-70b".to_string(),
            label: "Llama 3.1 70B".to_string(),
            system_role: "Use the system header for the role; be explicit about output language and length."
                .to_string(),
            sampling_tips: "Temperature 0.6 with top_p 0.9 is a reliable default.".to_string(),
            structuring_tips: "Give one or two short examples of the desired output; avoid deeply nested instructions."
                .to_string(),
            tool_calling: None,
            safety: None,
            prohibitions: strings(&[
                "Do not assume the model knows proprietary formats without examples.",
            ]),
            capabilities: caps(8192, 2.0, true),
        },
        ModelProfile {
            id: "mistral-large".to_string(),
            label: "Mistral Large".to_string(),
            system_role: "Assign a concise role and list the rules as short imperative sentences.".to_string(),
            sampling_tips: "Temperature 0.3-0.7; the model stays on task at moderate values.".to_string(),
            structuring_tips: "Markdown sections and explicit JSON schemas are followed well.".to_string(),
            tool_calling: Some(
                "Provide function definitions with required parameters marked; keep tool descriptions short."
                    .to_string(),
            ),
            safety: None,
            prohibitions: strings(&["Do not rely on implicit formatting conventions."]),
            capabilities: caps(8192, 1.5, true),
        },
    ]
}
