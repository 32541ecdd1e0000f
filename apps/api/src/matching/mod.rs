// Job-match screening pipeline.
// Implements: blocker detection, résumé section restriction, starred-item
// extraction, the comparison oracle, and validation/scoring/report rendering.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod blockers;
pub mod handlers;
pub mod matcher;
pub mod oracle;
pub mod prompts;
pub mod report;
pub mod scoring;
pub mod sections;
pub mod starred;
pub mod validate;
