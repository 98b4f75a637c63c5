#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure step interpreter that turns raw script lines into world commands.
//!
//! Parsing is deliberately tolerant: a token that names neither a fire
//! pattern nor a direction is ignored rather than rejected, so every line of
//! a script yields a step that at least descends the vessel.

use minefield_core::{Command, Direction, FirePattern, StepPlan};

/// Parses one raw step into the instructions it names.
///
/// A single token is tried as a direction first and then as a fire pattern.
/// Two or more tokens are read as `<pattern> <direction>`, each checked on
/// its own; tokens past the second are ignored.
#[must_use]
pub fn parse_step(raw: &str) -> StepPlan {
    let mut tokens = raw.split_whitespace();
    let Some(first) = tokens.next() else {
        return StepPlan::descend_only();
    };

    match tokens.next() {
        None => {
            if let Some(direction) = Direction::from_name(first) {
                StepPlan::new(None, Some(direction))
            } else {
                StepPlan::new(FirePattern::from_name(first), None)
            }
        }
        Some(second) => StepPlan::new(
            FirePattern::from_name(first),
            Direction::from_name(second),
        ),
    }
}

/// Appends the commands realising `plan`; the volley always precedes the move.
pub fn emit_commands(plan: StepPlan, out: &mut Vec<Command>) {
    if let Some(pattern) = plan.fire {
        out.push(Command::Fire { pattern });
    }
    out.push(Command::Move {
        direction: plan.movement,
    });
}

/// A single script line together with its parsed instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptStep {
    text: String,
    plan: StepPlan,
}

impl ScriptStep {
    /// Parses a raw script line.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        Self {
            text: text.to_owned(),
            plan: parse_step(text),
        }
    }

    /// Step text with surrounding whitespace removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Instructions recognised in the step.
    #[must_use]
    pub const fn plan(&self) -> StepPlan {
        self.plan
    }
}

/// Ordered sequence of steps executed one per descent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Builds a script from individual raw lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            steps: lines
                .into_iter()
                .map(|line| ScriptStep::parse(line.as_ref()))
                .collect(),
        }
    }

    /// Builds a script from file contents, one step per line.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::from_lines(source.lines())
    }

    /// Iterator over the steps in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptStep> {
        self.steps.iter()
    }

    /// Number of steps in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Reports whether the script has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
