#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic scoring system that tallies shots and moves from world events.

use minefield_core::Event;

const POINTS_PER_MINE: u64 = 10;
const SHOT_PENALTY: u64 = 5;
const SHOT_PENALTY_CAP_PER_MINE: u64 = 5;
const MOVE_PENALTY: u64 = 2;
const MOVE_PENALTY_CAP_PER_MINE: u64 = 3;

/// Counts of recognised instructions accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tally {
    /// Volleys fired with a recognised pattern.
    pub shots_fired: u32,
    /// Descents that also shifted the vessel one column.
    pub moves_made: u32,
}

/// Pure scoring system fed with the events of every applied command.
#[derive(Debug, Default)]
pub struct Scoring {
    tally: Tally,
}

impl Scoring {
    /// Creates a scoring system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events, counting volleys and horizontal moves.
    ///
    /// A descent without a direction is a drop and does not count as a move.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::VolleyFired { .. } => {
                    self.tally.shots_fired = self.tally.shots_fired.saturating_add(1);
                }
                Event::VesselDescended {
                    direction: Some(_),
                    ..
                } => {
                    self.tally.moves_made = self.tally.moves_made.saturating_add(1);
                }
                _ => {}
            }
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn tally(&self) -> Tally {
        self.tally
    }

    /// Score earned by clearing a field that started with `initial_mines` mines.
    #[must_use]
    pub fn score(&self, initial_mines: u32) -> u64 {
        compute_score(initial_mines, self.tally)
    }
}

/// Applies the scoring formula.
///
/// Each mine is worth ten points. Shots cost five points each and moves two,
/// but the shot penalty never exceeds five points per mine and the move
/// penalty never exceeds three, so the result is at least two points per mine.
#[must_use]
pub fn compute_score(initial_mines: u32, tally: Tally) -> u64 {
    let mines = u64::from(initial_mines);
    let shot_penalty =
        (SHOT_PENALTY * u64::from(tally.shots_fired)).min(SHOT_PENALTY_CAP_PER_MINE * mines);
    let move_penalty =
        (MOVE_PENALTY * u64::from(tally.moves_made)).min(MOVE_PENALTY_CAP_PER_MINE * mines);
    POINTS_PER_MINE * mines - shot_penalty - move_penalty
}
