//! The five pipeline steps. Each reads the record it is handed and returns a
//! single `RecordPatch`; none of them mutate shared state.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::prompts::EXTRACTION_SYSTEM;
use crate::llm_client::{ChatMessage, ChatModel};
use crate::pipeline::prompts::{
    fill_template, CANDIDATE_QUESTION, EXTRACTION_PROMPT_TEMPLATE, PITCH_INSTRUCTION,
    PITCH_PROMPT_TEMPLATE, PITCH_SYSTEM, RECEIVER_QUESTION,
};
use crate::pipeline::record::{Field, RecordPatch, SharedRecord};

/// Where the two profile files live.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    pub dir: PathBuf,
    pub candidate_file: String,
    pub receiver_file: String,
}

impl ProfileSource {
    pub fn candidate_path(&self) -> PathBuf {
        self.dir.join(&self.candidate_file)
    }

    pub fn receiver_path(&self) -> PathBuf {
        self.dir.join(&self.receiver_file)
    }
}

/// Collaborators shared by every step of one run.
pub struct StepContext<'a> {
    pub profiles: &'a ProfileSource,
    pub model: &'a dyn ChatModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    LoadCandidateProfile,
    LoadReceiverProfile,
    ExtractCandidateInformation,
    ExtractReceiverInformation,
    WriteReferralPitch,
}

/// Run order. Never skipped, retried or reordered.
pub const PIPELINE: [Step; 5] = [
    Step::LoadCandidateProfile,
    Step::LoadReceiverProfile,
    Step::ExtractCandidateInformation,
    Step::ExtractReceiverInformation,
    Step::WriteReferralPitch,
];

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::LoadCandidateProfile => "get_candidate_profile_content",
            Step::LoadReceiverProfile => "get_receiver_profile_content",
            Step::ExtractCandidateInformation => "extract_candidate_profile_information",
            Step::ExtractReceiverInformation => "extract_receiver_profile_information",
            Step::WriteReferralPitch => "write_a_referral_pitch",
        }
    }

    /// The one field this step writes.
    pub fn writes(&self) -> Field {
        match self {
            Step::LoadCandidateProfile => Field::CandidateProfileContent,
            Step::LoadReceiverProfile => Field::ReceiverProfileContent,
            Step::ExtractCandidateInformation => Field::CandidateProfileInformation,
            Step::ExtractReceiverInformation => Field::ReceiverProfileInformation,
            Step::WriteReferralPitch => Field::Pitch,
        }
    }

    pub async fn run(
        &self,
        record: &SharedRecord,
        ctx: &StepContext<'_>,
        out: &mut dyn Write,
    ) -> Result<RecordPatch, PipelineError> {
        let value = match self {
            Step::LoadCandidateProfile => load_profile(&ctx.profiles.candidate_path()).await?,
            Step::LoadReceiverProfile => load_profile(&ctx.profiles.receiver_path()).await?,
            Step::ExtractCandidateInformation => {
                let content = record.get(Field::CandidateProfileContent)?;
                extract_information(ctx.model, content, CANDIDATE_QUESTION).await?
            }
            Step::ExtractReceiverInformation => {
                let content = record.get(Field::ReceiverProfileContent)?;
                extract_information(ctx.model, content, RECEIVER_QUESTION).await?
            }
            Step::WriteReferralPitch => {
                let receiver = record.get(Field::ReceiverProfileInformation)?;
                let candidate = record.get(Field::CandidateProfileInformation)?;
                write_referral_pitch(ctx.model, receiver, candidate, out).await?
            }
        };

        Ok(RecordPatch::new(self.writes(), value))
    }
}

/// Reads a profile file in full. A missing file is `ProfileNotFound`.
pub async fn load_profile(path: &Path) -> Result<String, PipelineError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PipelineError::from_profile_io(path.to_path_buf(), e))?;

    info!("Loaded profile {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Asks the model to pull the fields named in `question` out of `profile`.
/// The reply is returned verbatim.
pub async fn extract_information(
    model: &dyn ChatModel,
    profile: &str,
    question: &str,
) -> Result<String, PipelineError> {
    let prompt = fill_template(
        EXTRACTION_PROMPT_TEMPLATE,
        &[("profile", profile), ("question", question)],
    );

    let messages = [ChatMessage::system(EXTRACTION_SYSTEM), ChatMessage::user(prompt)];
    Ok(model.complete(&messages).await?)
}

/// Composes the pitch from both summaries, printing progress markers to `out` first.
pub async fn write_referral_pitch(
    model: &dyn ChatModel,
    receiver_information: &str,
    candidate_information: &str,
    out: &mut dyn Write,
) -> Result<String, PipelineError> {
    print_progress(out, receiver_information, candidate_information)
        .map_err(PipelineError::Output)?;

    let prompt = fill_template(
        PITCH_PROMPT_TEMPLATE,
        &[
            ("receiver_information", receiver_information),
            ("candidate_information", candidate_information),
            ("instruction", PITCH_INSTRUCTION),
        ],
    );

    let messages = [ChatMessage::system(PITCH_SYSTEM), ChatMessage::user(prompt)];
    Ok(model.complete(&messages).await?)
}

fn print_progress(
    out: &mut dyn Write,
    receiver_information: &str,
    candidate_information: &str,
) -> std::io::Result<()> {
    writeln!(out, "Writing Referral Pitch...")?;
    writeln!(out, "Receiver Profile info {receiver_information}")?;
    writeln!(out, "Candidate Profile info {candidate_information}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubModel;
    use crate::llm_client::Role;

    fn source(dir: &Path) -> ProfileSource {
        ProfileSource {
            dir: dir.to_path_buf(),
            candidate_file: "profile2.txt".to_string(),
            receiver_file: "profile1.txt".to_string(),
        }
    }

    #[test]
    fn test_pipeline_writes_each_field_once_in_record_order() {
        let written: Vec<Field> = PIPELINE.iter().map(|s| s.writes()).collect();
        assert_eq!(written, Field::ALL.to_vec());
    }

    #[test]
    fn test_profile_paths_join_dir_and_file() {
        let src = source(Path::new("profiles"));
        assert_eq!(src.candidate_path(), PathBuf::from("profiles/profile2.txt"));
        assert_eq!(src.receiver_path(), PathBuf::from("profiles/profile1.txt"));
    }

    #[tokio::test]
    async fn test_load_profile_reads_full_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile1.txt");
        std::fs::write(&path, "Name: Bob\nOrg: Globex\n").unwrap();

        let content = load_profile(&path).await.unwrap();
        assert_eq!(content, "Name: Bob\nOrg: Globex\n");
    }

    #[tokio::test]
    async fn test_load_profile_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = load_profile(&path).await.unwrap_err();
        match err {
            PipelineError::ProfileNotFound { path: p } => assert_eq!(p, path),
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_sends_system_then_user_message() {
        let model = StubModel::new(["Name: Alice"]);
        let info = extract_information(&model, "Name: Alice, Org: Acme", CANDIDATE_QUESTION)
            .await
            .unwrap();
        assert_eq!(info, "Name: Alice");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        let messages = &calls[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, EXTRACTION_SYSTEM);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("Name: Alice, Org: Acme"));
        assert!(messages[1].content.ends_with(CANDIDATE_QUESTION));
    }

    #[tokio::test]
    async fn test_extract_stores_reply_verbatim() {
        let reply = "```json\n{\"name\": \"Bob\"}\n```  ";
        let model = StubModel::new([reply]);
        let info = extract_information(&model, "Name: Bob", RECEIVER_QUESTION)
            .await
            .unwrap();
        assert_eq!(info, reply);
    }

    #[tokio::test]
    async fn test_extract_step_without_content_makes_no_call() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = source(dir.path());
        let model = StubModel::new(["unused"]);
        let ctx = StepContext {
            profiles: &profiles,
            model: &model,
        };

        let err = Step::ExtractReceiverInformation
            .run(&SharedRecord::default(), &ctx, &mut Vec::<u8>::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MissingField(Field::ReceiverProfileContent)
        ));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pitch_prints_progress_and_embeds_both_summaries() {
        let model = StubModel::new(["Dear Bob, ..."]);
        let mut out = Vec::<u8>::new();

        let pitch = write_referral_pitch(&model, "Bob at Globex", "Alice, Rust", &mut out)
            .await
            .unwrap();
        assert_eq!(pitch, "Dear Bob, ...");

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            "Writing Referral Pitch...\n\
             Receiver Profile info Bob at Globex\n\
             Candidate Profile info Alice, Rust\n"
        );

        let calls = model.calls();
        assert_eq!(calls[0][0].content, PITCH_SYSTEM);
        let user = &calls[0][1].content;
        assert!(user.starts_with("Receiver Information: Bob at Globex"));
        assert!(user.contains("Candidate Information: Alice, Rust"));
        assert!(user.contains("under 100 words"));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_as_llm_error() {
        let model = StubModel::failing();
        let err = extract_information(&model, "Name: Bob", RECEIVER_QUESTION)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Llm(_)));
    }
}
