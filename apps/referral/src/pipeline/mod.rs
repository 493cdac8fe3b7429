// Referral pipeline: load both profiles, extract each, compose the pitch.
// All model calls go through llm_client::ChatModel, never HTTP directly.

pub mod prompts;
pub mod record;
pub mod runner;
pub mod steps;
