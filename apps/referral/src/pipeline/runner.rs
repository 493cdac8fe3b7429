//! Pipeline Runner: executes `PIPELINE` once, in order, over a fresh record.
//!
//! Flow: load candidate → load receiver → extract candidate → extract receiver →
//!       write pitch → print.
//!
//! The first failing step aborts the run; nothing after it executes.

use std::io::Write;

use tracing::{info, info_span, Instrument};

use crate::errors::PipelineError;
use crate::pipeline::record::{Field, SharedRecord};
use crate::pipeline::steps::{Step, StepContext, PIPELINE};

/// Runs `steps` in order starting from `record`, merging each step's patch.
pub async fn execute(
    steps: &[Step],
    mut record: SharedRecord,
    ctx: &StepContext<'_>,
    out: &mut dyn Write,
) -> Result<SharedRecord, PipelineError> {
    for step in steps {
        let patch = step
            .run(&record, ctx, &mut *out)
            .instrument(info_span!("step", name = step.name()))
            .await?;
        debug_assert_eq!(patch.field, step.writes());

        record = record.apply(patch)?;
        info!("Step {} wrote {}", step.name(), step.writes());
    }

    Ok(record)
}

/// Runs the full pipeline on an empty record and prints the final pitch.
pub async fn run_pipeline(
    ctx: &StepContext<'_>,
    out: &mut dyn Write,
) -> Result<SharedRecord, PipelineError> {
    let record = execute(&PIPELINE, SharedRecord::default(), ctx, &mut *out).await?;
    debug_assert!(record.is_complete());

    let pitch = record.get(Field::Pitch)?;
    writeln!(out, "Referral Pitch {pitch}").map_err(PipelineError::Output)?;

    Ok(record)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
