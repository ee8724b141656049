use std::io::Write;

use crate::app::{AppContext, Result};
use crate::pipeline::{RunMode, RunOutcome};

/// Run the pipeline once and report the outcome on `out`.
pub async fn run<W: Write>(ctx: &AppContext, mode: RunMode, date: &str, out: &mut W) -> Result<()> {
    let outcome = ctx.pipeline.run(mode, date).await?;

    match outcome {
        RunOutcome::DryRun { document } => {
            writeln!(out, "Subject: {}", document.subject)?;
            writeln!(out)?;
            writeln!(out, "{}", document.body_html)?;
        }
        RunOutcome::Delivered { receipt, .. } => {
            writeln!(
                out,
                "Sent {} to {} recipient(s)",
                receipt.id,
                receipt.recipients.len()
            )?;
        }
    }

    Ok(())
}
