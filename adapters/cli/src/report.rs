//! Machine-readable summary of a finished evaluation.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use minefield_core::Termination;
use minefield_system_evaluation::Outcome;
use serde::{Deserialize, Serialize};

const VERDICT_PASS: &str = "pass";
const VERDICT_FAIL: &str = "fail";

/// JSON document written by `--report`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RunReport {
    /// Either `pass` or `fail`.
    pub(crate) verdict: String,
    /// Score printed on the verdict line; zero on a failure.
    pub(crate) score: u64,
    /// Check that ended the run.
    pub(crate) termination: Termination,
    /// Number of steps that were executed.
    pub(crate) steps_executed: usize,
    /// Mines in the field before the first step.
    pub(crate) initial_mines: u32,
    /// Recognised volleys over the run.
    pub(crate) shots_fired: u32,
    /// Recognised horizontal moves over the run.
    pub(crate) moves_made: u32,
}

impl From<&Outcome> for RunReport {
    fn from(outcome: &Outcome) -> Self {
        let verdict = if outcome.verdict.is_pass() {
            VERDICT_PASS
        } else {
            VERDICT_FAIL
        };
        Self {
            verdict: verdict.to_owned(),
            score: outcome.verdict.score(),
            termination: outcome.termination,
            steps_executed: outcome.steps_executed,
            initial_mines: outcome.initial_mines,
            shots_fired: outcome.tally.shots_fired,
            moves_made: outcome.tally.moves_made,
        }
    }
}

impl RunReport {
    /// Serialises the report as pretty JSON into `path`.
    pub(crate) fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialise run report")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write run report to {}", path.display()))
    }
}
