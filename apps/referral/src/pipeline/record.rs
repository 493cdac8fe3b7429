//! Shared Record: the single value threaded through every pipeline step.
//!
//! Steps never mutate a record. Each returns a `RecordPatch` that the runner
//! merges with `SharedRecord::apply`, which enforces write-once fields.

use std::fmt;

use crate::errors::PipelineError;

/// Names of the record's fields, in the order the pipeline writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CandidateProfileContent,
    ReceiverProfileContent,
    CandidateProfileInformation,
    ReceiverProfileInformation,
    Pitch,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::CandidateProfileContent,
        Field::ReceiverProfileContent,
        Field::CandidateProfileInformation,
        Field::ReceiverProfileInformation,
        Field::Pitch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CandidateProfileContent => "candidate_profile_content",
            Field::ReceiverProfileContent => "receiver_profile_content",
            Field::CandidateProfileInformation => "candidate_profile_information",
            Field::ReceiverProfileInformation => "receiver_profile_information",
            Field::Pitch => "pitch",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step's output: a single field and the value to write into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    pub field: Field,
    pub value: String,
}

impl RecordPatch {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedRecord {
    candidate_profile_content: Option<String>,
    receiver_profile_content: Option<String>,
    candidate_profile_information: Option<String>,
    receiver_profile_information: Option<String>,
    pitch: Option<String>,
}

impl SharedRecord {
    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::CandidateProfileContent => &self.candidate_profile_content,
            Field::ReceiverProfileContent => &self.receiver_profile_content,
            Field::CandidateProfileInformation => &self.candidate_profile_information,
            Field::ReceiverProfileInformation => &self.receiver_profile_information,
            Field::Pitch => &self.pitch,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::CandidateProfileContent => &mut self.candidate_profile_content,
            Field::ReceiverProfileContent => &mut self.receiver_profile_content,
            Field::CandidateProfileInformation => &mut self.candidate_profile_information,
            Field::ReceiverProfileInformation => &mut self.receiver_profile_information,
            Field::Pitch => &mut self.pitch,
        }
    }

    /// Returns the field's value, or `MissingField` if no step has written it yet.
    pub fn get(&self, field: Field) -> Result<&str, PipelineError> {
        self.slot(field)
            .as_deref()
            .ok_or(PipelineError::MissingField(field))
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.is_set(*f))
    }

    /// Consumes the record and returns it with `patch` written.
    /// Fails with `FieldAlreadySet` rather than overwrite a populated field.
    pub fn apply(mut self, patch: RecordPatch) -> Result<Self, PipelineError> {
        let slot = self.slot_mut(patch.field);
        if slot.is_some() {
            return Err(PipelineError::FieldAlreadySet(patch.field));
        }
        *slot = Some(patch.value);
        Ok(self)
    }
}
