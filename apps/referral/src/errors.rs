use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::pipeline::record::Field;

/// Pipeline-level error type. Every variant is fatal: the run stops at the
/// first step that returns one.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Profile not found: {}", path.display())]
    ProfileNotFound { path: PathBuf },

    #[error("Failed to read profile {}: {source}", path.display())]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Field '{0}' read before any step wrote it")]
    MissingField(Field),

    #[error("Field '{0}' is already set")]
    FieldAlreadySet(Field),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl PipelineError {
    /// Maps a profile read failure, keeping "not found" distinct from other I/O errors.
    pub fn from_profile_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            PipelineError::ProfileNotFound { path }
        } else {
            PipelineError::ProfileRead { path, source }
        }
    }
}
