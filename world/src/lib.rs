#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative minefield state management.
//!
//! The [`World`] owns every mine, the vessel and the cached field rendering.
//! It is mutated only through [`apply`] and read through the [`query`]
//! functions and [`render`].

mod mines;
mod render;

use minefield_core::{ColumnCoord, Command, Event, VesselPosition};
use tracing::debug;

use crate::{mines::MineRegistry, render::RenderCache};

const SURFACE_DEPTH: i32 = 0;

/// Represents the authoritative minefield state.
#[derive(Debug)]
pub struct World {
    mines: MineRegistry,
    vessel: VesselPosition,
    render_cache: RenderCache,
}

impl World {
    /// Creates an empty field with the vessel at the surface above the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mines: MineRegistry::new(),
            vessel: VesselPosition::new(ColumnCoord::new(0, 0), SURFACE_DEPTH),
            render_cache: RenderCache::default(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceMine { column, depth } => {
            let (mine, previous) = world.mines.insert(column, depth);
            match previous {
                Some(previous) => out_events.push(Event::MineReplaced { previous, mine }),
                None => out_events.push(Event::MinePlaced { mine }),
            }
        }
        Command::PlaceVessel { column } => {
            world.vessel = VesselPosition::new(column, SURFACE_DEPTH);
            out_events.push(Event::VesselPlaced {
                position: world.vessel,
            });
        }
        Command::Fire { pattern } => {
            let centre = world.vessel.column();
            let had_mines = !world.mines.is_empty();
            let mut cleared = Vec::new();
            for &(dx, dy) in pattern.offsets() {
                if let Some(mine) = world.mines.remove_at(centre.offset(dx, dy)) {
                    debug!(
                        mine = mine.id().get(),
                        x = mine.column().x(),
                        y = mine.column().y(),
                        "mine cleared"
                    );
                    cleared.push(mine.id());
                    out_events.push(Event::MineCleared { mine });
                }
            }
            debug!(%pattern, cleared = cleared.len(), "volley fired");
            out_events.push(Event::VolleyFired { pattern, cleared });
            if had_mines && world.mines.is_empty() {
                out_events.push(Event::FieldCleared);
            }
        }
        Command::Move { direction } => {
            let from = world.vessel;
            let column = match direction {
                Some(direction) => {
                    let (dx, dy) = direction.delta();
                    from.column().offset(dx, dy)
                }
                None => from.column(),
            };
            let to = VesselPosition::new(column, from.depth().saturating_sub(1));
            world.vessel = to;
            match direction {
                Some(direction) => debug!(
                    %direction,
                    x = column.x(),
                    y = column.y(),
                    depth = to.depth(),
                    "vessel descended"
                ),
                None => debug!(
                    x = column.x(),
                    y = column.y(),
                    depth = to.depth(),
                    "vessel dropped"
                ),
            }
            out_events.push(Event::VesselDescended {
                direction,
                from,
                to,
            });
        }
    }
    world.render_cache.invalidate();
}

/// Returns the field as seen from the vessel, rendering it only when stale.
pub fn render(world: &mut World) -> &str {
    let World {
        mines,
        vessel,
        render_cache,
    } = world;
    render_cache.get_or_render(|| render::render_field(*vessel, mines))
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use minefield_core::{ColumnCoord, Mine, VesselPosition};

    /// Current vessel position.
    #[must_use]
    pub fn vessel(world: &World) -> VesselPosition {
        world.vessel
    }

    /// Mine occupying the provided column, if any.
    #[must_use]
    pub fn mine_at(world: &World, column: ColumnCoord) -> Option<Mine> {
        world.mines.at(column)
    }

    /// Mine closest to the surface, if any.
    ///
    /// Mines shadowed by a later placement in the same column are included.
    #[must_use]
    pub fn highest_mine(world: &World) -> Option<Mine> {
        world.mines.highest()
    }

    /// Remaining mines in identifier order.
    #[must_use]
    pub fn remaining_mines(world: &World) -> Vec<Mine> {
        world.mines.iter().copied().collect()
    }

    /// Number of mines still in the field.
    #[must_use]
    pub fn remaining_mine_count(world: &World) -> usize {
        world.mines.len()
    }

    /// Number of mines placed before the run started. Clearing never lowers it.
    #[must_use]
    pub fn initial_mine_count(world: &World) -> u32 {
        world.mines.placed()
    }

    /// Reports whether the vessel has reached or passed the depth of a remaining mine.
    #[must_use]
    pub fn passed_mine(world: &World) -> bool {
        world
            .mines
            .highest()
            .is_some_and(|mine| mine.depth() >= world.vessel.depth())
    }

    /// Reports whether every mine has been cleared.
    #[must_use]
    pub fn all_mines_clear(world: &World) -> bool {
        world.mines.is_empty()
    }

    /// Reports whether the cached rendering still reflects the current state.
    #[must_use]
    pub fn render_is_current(world: &World) -> bool {
        world.render_cache.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{Direction, FirePattern, Mine, MineId};

    fn world_with(vessel: ColumnCoord, mines: &[(i32, i32, i32)]) -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        for &(x, y, depth) in mines {
            apply(
                &mut world,
                Command::PlaceMine {
                    column: ColumnCoord::new(x, y),
                    depth,
                },
                &mut events,
            );
        }
        apply(&mut world, Command::PlaceVessel { column: vessel }, &mut events);
        (world, events)
    }

    #[test]
    fn placement_emits_events_in_order() {
        let (world, events) = world_with(ColumnCoord::new(1, -1), &[(0, 0, -2)]);

        assert_eq!(
            events,
            vec![
                Event::MinePlaced {
                    mine: Mine::new(MineId::new(0), ColumnCoord::new(0, 0), -2),
                },
                Event::VesselPlaced {
                    position: VesselPosition::new(ColumnCoord::new(1, -1), 0),
                },
            ]
        );
        assert_eq!(query::initial_mine_count(&world), 1);
    }

    #[test]
    fn passed_mine_is_false_when_every_mine_is_below_surface() {
        let (world, _) = world_with(ColumnCoord::new(1, -1), &[(0, 0, -1), (2, -2, -52)]);
        assert!(!query::passed_mine(&world));
    }

    #[test]
    fn passed_mine_is_true_for_mine_at_surface() {
        let (world, _) = world_with(ColumnCoord::new(1, -1), &[(0, 0, 0)]);
        assert!(query::passed_mine(&world));
    }

    #[test]
    fn passed_mine_is_false_without_mines() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[]);
        let mut events = Vec::new();
        for _ in 0..5 {
            apply(&mut world, Command::Move { direction: None }, &mut events);
        }
        assert!(!query::passed_mine(&world));
        assert!(query::all_mines_clear(&world));
    }

    /// Fills the 3x3 block around `(1, -1)` and fires `pattern` from its centre.
    fn fire_into_full_block(pattern: FirePattern) -> (World, Vec<Event>) {
        let mut mines = Vec::new();
        for y in -2..=0 {
            for x in 0..=2 {
                mines.push((x, y, -3));
            }
        }
        let (mut world, _) = world_with(ColumnCoord::new(1, -1), &mines);
        let mut events = Vec::new();
        apply(&mut world, Command::Fire { pattern }, &mut events);
        (world, events)
    }

    fn assert_cleared_exactly(world: &World, events: &[Event], cleared: &[(i32, i32)]) {
        for y in -2..=0 {
            for x in 0..=2 {
                let hit = cleared.contains(&(x - 1, y + 1));
                assert_eq!(
                    query::mine_at(world, ColumnCoord::new(x, y)).is_none(),
                    hit,
                    "column ({x}, {y})"
                );
            }
        }
        assert_eq!(query::remaining_mine_count(world), 9 - cleared.len());
        assert!(matches!(
            events.last(),
            Some(Event::VolleyFired { cleared: ids, .. }) if ids.len() == cleared.len()
        ));
    }

    #[test]
    fn alpha_clears_only_diagonals() {
        let (world, events) = fire_into_full_block(FirePattern::Alpha);

        let remaining: Vec<ColumnCoord> = query::remaining_mines(&world)
            .into_iter()
            .map(|mine| mine.column())
            .collect();
        assert_eq!(
            remaining,
            vec![
                ColumnCoord::new(1, 0),
                ColumnCoord::new(0, -1),
                ColumnCoord::new(1, -1),
                ColumnCoord::new(2, -1),
                ColumnCoord::new(1, -2),
            ]
        );
        assert_cleared_exactly(&world, &events, &[(-1, -1), (-1, 1), (1, -1), (1, 1)]);
    }

    #[test]
    fn beta_clears_only_orthogonal_neighbours() {
        let (world, events) = fire_into_full_block(FirePattern::Beta);

        assert_cleared_exactly(&world, &events, &[(-1, 0), (0, -1), (0, 1), (1, 0)]);
        assert!(query::mine_at(&world, ColumnCoord::new(1, -1)).is_some());
    }

    #[test]
    fn gamma_clears_the_row_through_the_vessel() {
        let (world, events) = fire_into_full_block(FirePattern::Gamma);

        assert_cleared_exactly(&world, &events, &[(-1, 0), (0, 0), (1, 0)]);
    }

    #[test]
    fn delta_clears_the_column_through_the_vessel() {
        let (world, events) = fire_into_full_block(FirePattern::Delta);

        assert_cleared_exactly(&world, &events, &[(0, -1), (0, 0), (0, 1)]);
    }

    #[test]
    fn fire_does_not_move_the_vessel() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[(0, 0, -2)]);
        let before = query::vessel(&world);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Fire {
                pattern: FirePattern::Gamma,
            },
            &mut events,
        );

        assert_eq!(query::vessel(&world), before);
        assert!(query::all_mines_clear(&world));
        assert_eq!(events.last(), Some(&Event::FieldCleared));
        assert_eq!(query::initial_mine_count(&world), 1);
    }

    #[test]
    fn move_always_descends_one_unit() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[]);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Move {
                direction: Some(Direction::North),
            },
            &mut events,
        );
        assert_eq!(
            query::vessel(&world),
            VesselPosition::new(ColumnCoord::new(0, 1), -1)
        );

        apply(&mut world, Command::Move { direction: None }, &mut events);
        assert_eq!(
            query::vessel(&world),
            VesselPosition::new(ColumnCoord::new(0, 1), -2)
        );

        apply(
            &mut world,
            Command::Move {
                direction: Some(Direction::West),
            },
            &mut events,
        );
        assert_eq!(
            query::vessel(&world),
            VesselPosition::new(ColumnCoord::new(-1, 1), -3)
        );
    }

    #[test]
    fn descending_onto_mine_depth_is_a_collision() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[(0, 0, -1)]);
        let mut events = Vec::new();
        apply(&mut world, Command::Move { direction: None }, &mut events);
        assert!(query::passed_mine(&world));
    }

    #[test]
    fn shadowed_duplicate_still_collides() {
        let (mut world, events) = world_with(ColumnCoord::new(0, 0), &[(0, 0, -1), (0, 0, -5)]);
        assert!(matches!(events[1], Event::MineReplaced { .. }));
        assert_eq!(query::initial_mine_count(&world), 2);
        assert_eq!(query::remaining_mine_count(&world), 1);

        let mut events = Vec::new();
        apply(&mut world, Command::Move { direction: None }, &mut events);

        assert!(query::passed_mine(&world));
        assert_eq!(
            query::mine_at(&world, ColumnCoord::new(0, 0)).map(|mine| mine.depth()),
            Some(-5)
        );
    }

    #[test]
    fn clearing_a_shadowing_mine_empties_the_field() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[(0, 0, -4), (0, 0, -2)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Fire {
                pattern: FirePattern::Gamma,
            },
            &mut events,
        );

        assert!(query::all_mines_clear(&world));
        assert_eq!(query::highest_mine(&world).map(|mine| mine.depth()), Some(-4));
        assert!(!query::passed_mine(&world));
    }

    #[test]
    fn render_is_invalidated_by_every_mutation() {
        let (mut world, _) = world_with(ColumnCoord::new(1, -1), &[(0, 0, -2)]);
        let _ = render(&mut world);
        assert!(query::render_is_current(&world));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Fire {
                pattern: FirePattern::Delta,
            },
            &mut events,
        );
        assert!(!query::render_is_current(&world));

        let _ = render(&mut world);
        apply(&mut world, Command::Move { direction: None }, &mut events);
        assert!(!query::render_is_current(&world));
    }

    #[test]
    fn render_centres_on_vessel() {
        let (mut world, _) = world_with(ColumnCoord::new(1, -1), &[(0, 0, -1), (2, -2, -27)]);
        assert_eq!(render(&mut world), "a..\n...\n..A");
    }

    #[test]
    fn render_grows_to_cover_far_mines() {
        let (mut world, _) = world_with(ColumnCoord::new(0, 0), &[(3, 0, -2)]);
        assert_eq!(render(&mut world), "......b");
    }
}
