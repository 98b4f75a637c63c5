//! Authoritative mine storage: a column index and a depth order owned by one registry.

use std::collections::{BTreeMap, BTreeSet};

use minefield_core::{ColumnCoord, Mine, MineId};

/// Registry that stores mines and manages identifier allocation.
///
/// `columns` indexes exactly the mines held in `entries`. `depths` orders
/// those plus every mine in `shadowed`: mines that lost their column to a
/// later placement. Shadowed mines can no longer be cleared, yet they still
/// count toward [`Self::highest`].
#[derive(Debug)]
pub(crate) struct MineRegistry {
    entries: BTreeMap<MineId, Mine>,
    shadowed: BTreeMap<MineId, Mine>,
    columns: BTreeMap<ColumnCoord, MineId>,
    depths: BTreeSet<(i32, MineId)>,
    next_mine_id: MineId,
    placed: u32,
}

impl MineRegistry {
    /// Creates an empty mine registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            shadowed: BTreeMap::new(),
            columns: BTreeMap::new(),
            depths: BTreeSet::new(),
            next_mine_id: MineId::new(0),
            placed: 0,
        }
    }

    /// Inserts a mine, shadowing any mine that already occupies the column.
    ///
    /// Returns the stored mine together with the shadowed one, if any. Every
    /// call counts toward [`Self::placed`].
    pub(crate) fn insert(&mut self, column: ColumnCoord, depth: i32) -> (Mine, Option<Mine>) {
        let previous = self
            .columns
            .remove(&column)
            .and_then(|id| self.entries.remove(&id));
        if let Some(previous) = previous {
            let _ = self.shadowed.insert(previous.id(), previous);
        }

        let id = self.next_mine_id;
        self.next_mine_id = MineId::new(id.get().saturating_add(1));
        self.placed = self.placed.saturating_add(1);

        let mine = Mine::new(id, column, depth);
        let _ = self.entries.insert(id, mine);
        let _ = self.columns.insert(column, id);
        let _ = self.depths.insert((depth, id));
        (mine, previous)
    }

    /// Removes the mine occupying `column` from every index.
    pub(crate) fn remove_at(&mut self, column: ColumnCoord) -> Option<Mine> {
        let id = self.columns.remove(&column)?;
        let mine = self.entries.remove(&id)?;
        let _ = self.depths.remove(&(mine.depth(), id));
        Some(mine)
    }

    /// Mine occupying the provided column, if any.
    pub(crate) fn at(&self, column: ColumnCoord) -> Option<Mine> {
        self.columns
            .get(&column)
            .and_then(|id| self.entries.get(id))
            .copied()
    }

    /// Mine closest to the surface, shadowed mines included.
    pub(crate) fn highest(&self) -> Option<Mine> {
        self.depths
            .last()
            .and_then(|(_, id)| self.entries.get(id).or_else(|| self.shadowed.get(id)))
            .copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    /// Number of placements accepted since creation. Never decreases.
    pub(crate) fn placed(&self) -> u32 {
        self.placed
    }

    /// Remaining reachable mines in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Mine> {
        self.entries.values()
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.columns.len() == self.entries.len()
            && self.depths.len() == self.entries.len() + self.shadowed.len()
            && self.columns.iter().all(|(column, id)| {
                self.entries
                    .get(id)
                    .is_some_and(|mine| mine.column() == *column)
            })
            && self.depths.iter().all(|(depth, id)| {
                self.entries
                    .get(id)
                    .or_else(|| self.shadowed.get(id))
                    .is_some_and(|mine| mine.depth() == *depth)
            })
    }
}
