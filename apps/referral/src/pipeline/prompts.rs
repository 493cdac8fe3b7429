// All LLM prompt constants for the referral pipeline.
// Reuses the shared extraction system prompt from llm_client::prompts.

/// Extraction question for the receiver's profile.
pub const RECEIVER_QUESTION: &str =
    "Get Profile details like name, organization and current role from the profile content.";

/// Extraction question for the candidate's profile.
pub const CANDIDATE_QUESTION: &str = "Get Profile details like name, organization, current role, \
    experience and skill from the profile content.";

/// User message for an extraction call. Replace: {profile}, {question}
pub const EXTRACTION_PROMPT_TEMPLATE: &str = "Profile: {profile}\n\nQuestion: {question}";

/// System prompt for the pitch composer.
pub const PITCH_SYSTEM: &str = "You are the Candidate trying to write a referral pitch for \
    applying to an open position in the receiver's organization.";

/// Fixed pitch instruction sent after both summaries.
pub const PITCH_INSTRUCTION: &str = r#"You are a candidate applying for an AI Engineer role.
Write a referral pitch for applying to an open position in the receiver's organization
based on the receiver's profile information and the candidate profile information.
The receiver information has the receiver name, organization, and current role.
The candidate information has the candidate name, organization, current role, experience, and skills.

The pitch should be concise, professional, and highlight the candidate's skills and
experiences that make them a good fit for the position.

Keep the pitch message concise and to the point, under 100 words."#;

/// User message for the composer call.
/// Replace: {receiver_information}, {candidate_information}, {instruction}
pub const PITCH_PROMPT_TEMPLATE: &str = r#"Receiver Information: {receiver_information}

Candidate Information: {candidate_information}

Question: {instruction}"#;

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so profile text that happens to
/// contain `{question}` or similar is sent through untouched. Unknown
/// placeholders are left as written.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
