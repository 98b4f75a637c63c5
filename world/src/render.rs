//! Text rendering of the field as seen from the vessel.

use minefield_core::{ColumnCoord, VesselPosition, MAX_RENDERED_DISTANCE};

use crate::mines::MineRegistry;

const EMPTY_CELL: char = '.';
const COLLISION_CELL: char = '*';

/// Two-state cache holding the most recent rendering.
///
/// The cache is stale from creation until the first render and again after
/// every mutation the world applies.
#[derive(Debug, Default)]
pub(crate) struct RenderCache {
    rendered: Option<String>,
}

impl RenderCache {
    pub(crate) fn invalidate(&mut self) {
        self.rendered = None;
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.rendered.is_some()
    }

    /// Returns the cached rendering, producing it first when stale.
    pub(crate) fn get_or_render<F>(&mut self, render: F) -> &str
    where
        F: FnOnce() -> String,
    {
        self.rendered.get_or_insert_with(render).as_str()
    }
}

/// Renders the smallest rectangle centred on the vessel that covers every mine.
///
/// Rows run north to south and cells west to east. Rows are separated by a
/// single `\n` without a trailing newline.
pub(crate) fn render_field(vessel: VesselPosition, mines: &MineRegistry) -> String {
    let centre = vessel.column();
    let (half_width, half_height) = mines.iter().fold((0_u32, 0_u32), |(w, h), mine| {
        let (dx, dy) = mine.column().axis_distance(centre);
        (w.max(dx), h.max(dy))
    });

    let half_width = i64::from(half_width);
    let half_height = i64::from(half_height);
    let centre_x = i64::from(centre.x());
    let centre_y = i64::from(centre.y());

    let mut rows = Vec::with_capacity(usize::try_from(2 * half_height + 1).unwrap_or(0));
    for y in (centre_y - half_height..=centre_y + half_height).rev() {
        let row: String = (centre_x - half_width..=centre_x + half_width)
            .map(|x| cell_glyph(vessel, mines, x, y))
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

fn cell_glyph(vessel: VesselPosition, mines: &MineRegistry, x: i64, y: i64) -> char {
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
        return EMPTY_CELL;
    };
    mines
        .at(ColumnCoord::new(x, y))
        .map_or(EMPTY_CELL, |mine| {
            distance_glyph(vessel.distance_to(mine.depth()))
        })
}

/// Maps the remaining descent toward a mine onto its display character.
///
/// Distances beyond [`MAX_RENDERED_DISTANCE`] have no letter and show as empty.
pub(crate) fn distance_glyph(distance: i32) -> char {
    match distance {
        d if d <= 0 => COLLISION_CELL,
        1..=26 => char::from(b'a' + (distance - 1) as u8),
        27..=MAX_RENDERED_DISTANCE => char::from(b'A' + (distance - 27) as u8),
        _ => EMPTY_CELL,
    }
}
