#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Evaluation system that drives a minefield through a script and decides the verdict.
//!
//! The termination checks run in a fixed order:
//!
//! 1. before the first step, a mine already level with the vessel fails the run;
//! 2. before every step, an empty field passes with a single point;
//! 3. after every step, reaching the depth of a remaining mine fails the run;
//! 4. once the script is exhausted, an empty field passes with the computed
//!    score and anything else fails.

use minefield_core::{Command, Event, StepPlan, Termination, Verdict};
use minefield_system_script::{emit_commands, Script};
use minefield_system_scoring::{Scoring, Tally};
use minefield_world::{self as world, query, World};
use tracing::{debug, info};

const EARLY_CLEAR_SCORE: u64 = 1;

/// Field renderings captured around one executed step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// One-based position of the step in the script.
    pub index: usize,
    /// Trimmed step text.
    pub text: String,
    /// Field as rendered before the step ran.
    pub before: String,
    /// Field as rendered after the step ran.
    pub after: String,
}

/// Summary of a finished evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Final verdict, including the score on a pass.
    pub verdict: Verdict,
    /// Check that ended the run.
    pub termination: Termination,
    /// Number of steps that were executed.
    pub steps_executed: usize,
    /// Mines in the field before the first step.
    pub initial_mines: u32,
    /// Recognised shots and moves over the whole run.
    pub tally: Tally,
}

/// Drives the world one script step at a time.
#[derive(Debug, Default)]
pub struct Evaluation {
    scoring: Scoring,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Evaluation {
    /// Creates a new evaluation with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `script` against `world` until one of the termination checks fires.
    ///
    /// `on_step` receives a record for every executed step, in order, before
    /// the post-step collision check runs.
    pub fn run<F>(&mut self, world: &mut World, script: &Script, mut on_step: F) -> Outcome
    where
        F: FnMut(StepRecord),
    {
        self.scoring = Scoring::new();
        let initial_mines = query::initial_mine_count(world);
        let mut steps_executed = 0;

        if query::passed_mine(world) {
            return self.finish(
                Verdict::Fail,
                Termination::UnsolvableField,
                steps_executed,
                initial_mines,
            );
        }

        for (offset, step) in script.iter().enumerate() {
            if query::all_mines_clear(world) {
                return self.finish(
                    Verdict::Pass {
                        score: EARLY_CLEAR_SCORE,
                    },
                    Termination::ClearedEarly,
                    steps_executed,
                    initial_mines,
                );
            }

            let before = world::render(world).to_owned();
            self.execute(world, step.plan());
            let after = world::render(world).to_owned();
            steps_executed += 1;

            debug!(
                step = offset + 1,
                text = step.text(),
                remaining = query::remaining_mine_count(world),
                depth = query::vessel(world).depth(),
                "step executed"
            );
            on_step(StepRecord {
                index: offset + 1,
                text: step.text().to_owned(),
                before,
                after,
            });

            if query::passed_mine(world) {
                return self.finish(
                    Verdict::Fail,
                    Termination::Collision,
                    steps_executed,
                    initial_mines,
                );
            }
        }

        if query::all_mines_clear(world) {
            let score = self.scoring.score(initial_mines);
            self.finish(
                Verdict::Pass { score },
                Termination::ScriptCompleted,
                steps_executed,
                initial_mines,
            )
        } else {
            self.finish(
                Verdict::Fail,
                Termination::MinesRemaining,
                steps_executed,
                initial_mines,
            )
        }
    }

    fn execute(&mut self, world: &mut World, plan: StepPlan) {
        self.commands.clear();
        emit_commands(plan, &mut self.commands);
        for command in self.commands.drain(..) {
            self.events.clear();
            world::apply(world, command, &mut self.events);
            self.scoring.handle(&self.events);
        }
    }

    fn finish(
        &self,
        verdict: Verdict,
        termination: Termination,
        steps_executed: usize,
        initial_mines: u32,
    ) -> Outcome {
        info!(%verdict, ?termination, steps_executed, "evaluation finished");
        Outcome {
            verdict,
            termination,
            steps_executed,
            initial_mines,
            tally: self.scoring.tally(),
        }
    }
}
