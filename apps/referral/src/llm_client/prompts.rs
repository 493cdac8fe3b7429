// Shared prompt constants.
// Step-specific questions and templates live in pipeline/prompts.rs.

/// System prompt for every profile extraction call.
pub const EXTRACTION_SYSTEM: &str =
    "You are a helpful assistant that extracts profile details from the provided content.";
