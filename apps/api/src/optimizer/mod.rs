// Meta-prompt optimization engine.
// normalizer → composer → (provider) → parser | fallback, sequenced by the orchestrator.
// All provider calls go through llm_client; nothing here talks HTTP to an LLM directly.

pub mod composer;
pub mod fallback;
pub mod handlers;
pub mod input;
pub mod normalizer;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod validation;
