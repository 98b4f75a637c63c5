#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Minefield engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative minefield world, and pure systems. Adapters and systems
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest depth distance that still has a dedicated glyph in a rendered field.
pub const MAX_RENDERED_DISTANCE: i32 = 52;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places a mine at the provided column and depth.
    PlaceMine {
        /// Column the mine occupies.
        column: ColumnCoord,
        /// Depth of the mine, negative below the surface.
        depth: i32,
    },
    /// Places the vessel at the surface above the provided column.
    PlaceVessel {
        /// Column the vessel starts above.
        column: ColumnCoord,
    },
    /// Fires a volley around the vessel's current column.
    Fire {
        /// Offset pattern that selects the targeted columns.
        pattern: FirePattern,
    },
    /// Descends the vessel one unit, optionally shifting it one column.
    Move {
        /// Horizontal shift applied before descending, if any.
        direction: Option<Direction>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a mine joined the field.
    MinePlaced {
        /// The placed mine.
        mine: Mine,
    },
    /// Reports that a placement took over a column already holding a mine.
    MineReplaced {
        /// Mine no longer reachable through its column. It still counts for collisions.
        previous: Mine,
        /// Mine that now occupies the column.
        mine: Mine,
    },
    /// Confirms that the vessel was placed at its starting position.
    VesselPlaced {
        /// Starting position of the vessel.
        position: VesselPosition,
    },
    /// Confirms that a volley was fired, listing every mine it cleared.
    VolleyFired {
        /// Pattern used for the volley.
        pattern: FirePattern,
        /// Mines removed by the volley in offset order.
        cleared: Vec<MineId>,
    },
    /// Confirms that a single mine was removed from the field.
    MineCleared {
        /// The mine that was cleared.
        mine: Mine,
    },
    /// Confirms that the vessel descended one unit.
    VesselDescended {
        /// Horizontal shift applied during the descent, if any.
        direction: Option<Direction>,
        /// Position before the descent.
        from: VesselPosition,
        /// Position after the descent.
        to: VesselPosition,
    },
    /// Announces that the last remaining mine was removed.
    FieldCleared,
}

/// Horizontal location of a mine column, independent of depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnCoord {
    x: i32,
    y: i32,
}

impl ColumnCoord {
    /// Creates a new column coordinate. `x` grows eastward and `y` northward.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// East-west coordinate of the column.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// North-south coordinate of the column.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the column displaced by the provided offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Absolute per-axis distance between two columns.
    #[must_use]
    pub const fn axis_distance(self, other: ColumnCoord) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

/// Unique identifier assigned to a mine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MineId(u32);

impl MineId {
    /// Creates a new mine identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Stationary hazard fixed at a column and depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mine {
    id: MineId,
    column: ColumnCoord,
    depth: i32,
}

impl Mine {
    /// Creates a new mine descriptor.
    #[must_use]
    pub const fn new(id: MineId, column: ColumnCoord, depth: i32) -> Self {
        Self { id, column, depth }
    }

    /// Identifier allocated by the world.
    #[must_use]
    pub const fn id(&self) -> MineId {
        self.id
    }

    /// Column the mine occupies.
    #[must_use]
    pub const fn column(&self) -> ColumnCoord {
        self.column
    }

    /// Depth of the mine. Larger values sit closer to the surface.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }
}

/// Three-dimensional position of the vessel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselPosition {
    column: ColumnCoord,
    depth: i32,
}

impl VesselPosition {
    /// Creates a new vessel position.
    #[must_use]
    pub const fn new(column: ColumnCoord, depth: i32) -> Self {
        Self { column, depth }
    }

    /// Column the vessel currently occupies.
    #[must_use]
    pub const fn column(&self) -> ColumnCoord {
        self.column
    }

    /// Current depth of the vessel. Starts at zero and only decreases.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Number of descent steps remaining before the vessel reaches `mine_depth`.
    ///
    /// Zero or negative values mean the vessel is level with or below the mine.
    #[must_use]
    pub const fn distance_to(&self, mine_depth: i32) -> i32 {
        self.depth.saturating_sub(mine_depth)
    }
}

/// Fixed volley patterns the vessel can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirePattern {
    /// The four diagonal neighbours.
    Alpha,
    /// The four orthogonal neighbours.
    Beta,
    /// Three cells along the x axis, centred on the vessel.
    Gamma,
    /// Three cells along the y axis, centred on the vessel.
    Delta,
}

const ALPHA_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const BETA_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const GAMMA_OFFSETS: [(i32, i32); 3] = [(-1, 0), (0, 0), (1, 0)];
const DELTA_OFFSETS: [(i32, i32); 3] = [(0, -1), (0, 0), (0, 1)];

impl FirePattern {
    /// Every pattern in declaration order.
    pub const ALL: [FirePattern; 4] = [Self::Alpha, Self::Beta, Self::Gamma, Self::Delta];

    /// Resolves a script token into a pattern. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.name() == name)
    }

    /// Script token naming the pattern.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::Delta => "delta",
        }
    }

    /// Column offsets, relative to the vessel, targeted by the volley.
    #[must_use]
    pub const fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Alpha => &ALPHA_OFFSETS,
            Self::Beta => &BETA_OFFSETS,
            Self::Gamma => &GAMMA_OFFSETS,
            Self::Delta => &DELTA_OFFSETS,
        }
    }
}

impl fmt::Display for FirePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cardinal directions available to the vessel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Every direction in declaration order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Resolves a script token into a direction. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.name() == name)
    }

    /// Script token naming the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Column offset applied by a move in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instructions recognised in a single script step.
///
/// Either half may be absent: an empty plan is a plain drop that still
/// descends the vessel by one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StepPlan {
    /// Volley fired before the vessel moves, if any.
    pub fire: Option<FirePattern>,
    /// Horizontal shift applied while descending, if any.
    pub movement: Option<Direction>,
}

impl StepPlan {
    /// Creates a plan from optional fire and move instructions.
    #[must_use]
    pub const fn new(fire: Option<FirePattern>, movement: Option<Direction>) -> Self {
        Self { fire, movement }
    }

    /// Plan that only descends.
    #[must_use]
    pub const fn descend_only() -> Self {
        Self::new(None, None)
    }
}

/// Final outcome of an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The vessel hit a mine, or mines remained once the script ended.
    Fail,
    /// Every mine was cleared before any collision.
    Pass {
        /// Points awarded for the run.
        score: u64,
    },
}

impl Verdict {
    /// Points carried by the verdict. Failures are always worth zero.
    #[must_use]
    pub const fn score(&self) -> u64 {
        match self {
            Self::Fail => 0,
            Self::Pass { score } => *score,
        }
    }

    /// Reports whether the verdict is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail (0)"),
            Self::Pass { score } => write!(f, "pass({score})"),
        }
    }
}

/// Reason an evaluation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A mine already sat at or above the vessel before the first step.
    UnsolvableField,
    /// The field was empty while steps remained.
    ClearedEarly,
    /// The vessel reached the depth of a remaining mine.
    Collision,
    /// The script ran out with every mine cleared.
    ScriptCompleted,
    /// The script ran out with mines still in the field.
    MinesRemaining,
}
