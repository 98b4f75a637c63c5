//! Console transcript of an evaluation.

use std::io::{self, Write};

use minefield_core::Verdict;
use minefield_system_evaluation::StepRecord;

/// Writes one executed step: header, field before, step text and field after,
/// each followed by a blank line.
pub(crate) fn write_step<W: Write>(out: &mut W, record: &StepRecord) -> io::Result<()> {
    writeln!(out, "Step {}", record.index)?;
    writeln!(out)?;
    writeln!(out, "{}", record.before)?;
    writeln!(out)?;
    writeln!(out, "{}", record.text)?;
    writeln!(out)?;
    writeln!(out, "{}", record.after)?;
    writeln!(out)
}

/// Writes the closing verdict line.
pub(crate) fn write_verdict<W: Write>(out: &mut W, verdict: Verdict) -> io::Result<()> {
    writeln!(out, "{verdict}")
}
