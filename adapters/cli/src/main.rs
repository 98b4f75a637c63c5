#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that evaluates a minefield script and prints the transcript.

mod loader;
mod report;
mod transcript;

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use minefield_system_evaluation::Evaluation;
use report::RunReport;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Evaluates a vessel script against a minefield.
#[derive(Debug, Parser)]
#[command(name = "minefield")]
#[command(about = "Runs a vessel script against a minefield and prints the scored transcript")]
struct Args {
    /// Path to the field file.
    #[arg(value_name = "FIELD")]
    field: PathBuf,

    /// Path to the script file, one step per line.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Also write a JSON summary of the run to this path.
    #[arg(short, long, value_name = "PATH")]
    report: Option<PathBuf>,
}

/// Entry point for the minefield command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let layout = loader::read_field(&args.field)?;
    let script = loader::read_script(&args.script)?;
    let mut world = layout.build_world();
    debug!(
        field = %args.field.display(),
        steps = script.len(),
        "inputs loaded"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_result = Ok(());
    let outcome = Evaluation::new().run(&mut world, &script, |record| {
        if write_result.is_ok() {
            write_result = transcript::write_step(&mut out, &record);
        }
    });
    write_result.context("failed to write transcript")?;
    transcript::write_verdict(&mut out, outcome.verdict).context("failed to write verdict")?;
    out.flush().context("failed to flush transcript")?;

    if let Some(path) = &args.report {
        RunReport::from(&outcome).write_to(path)?;
    }
    Ok(())
}
