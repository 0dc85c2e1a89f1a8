// LogAnalyzer - core/report.rs
//
// Human-readable run summary. Writes to any `Write` so the CLI can target
// stdout and tests can target a buffer.

use crate::core::model::Outcome;
use std::io::{self, Write};

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Write the per-outcome listing followed by the success/failure totals.
pub fn write_summary<W: Write>(outcomes: &[Outcome], mut out: W) -> io::Result<RunSummary> {
    let summary = RunSummary::from_outcomes(outcomes);

    writeln!(out, "\n=== Log Analysis Summary ===")?;
    writeln!(out, "Total logs analyzed: {}\n", summary.total)?;

    for outcome in outcomes {
        writeln!(out, "ID: {}", outcome.id())?;
        writeln!(out, "Path: {}", outcome.target())?;
        writeln!(out, "Status: {}", outcome.status())?;
        writeln!(out, "Message: {}", outcome.message())?;
        if !outcome.error_detail().is_empty() {
            writeln!(out, "Error: {}", outcome.error_detail())?;
        }
        writeln!(out, "---")?;
    }

    writeln!(
        out,
        "\nResults: {} successful, {} failed",
        summary.succeeded, summary.failed
    )?;
    out.flush()?;

    Ok(summary)
}
