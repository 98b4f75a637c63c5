//! Reads field and script files into the shapes the engine consumes.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use minefield_core::{ColumnCoord, Command};
use minefield_system_script::Script;
use minefield_world::{self as world, World};
use thiserror::Error;

const EMPTY_CELL: char = '.';
const LOWERCASE_DEPTH_OFFSET: i32 = 1;
const UPPERCASE_DEPTH_OFFSET: i32 = 27;

/// Errors raised while loading input files. All of them abort the run.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
    /// An input file does not exist.
    #[error("Input files not found! ({})", path.display())]
    Missing {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// An input file exists but could not be read as UTF-8 text.
    #[error("Input file could not be read! ({})", path.display())]
    Unreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The field file is empty or its rows differ in length.
    #[error("The lines in the field file don't have the same length")]
    UnequalRowLengths,
    /// The field file contains a character that is neither `.` nor a letter.
    #[error("The field file contains invalid character! ({character:?} at row {row}, column {column})")]
    InvalidFieldCharacter {
        /// Offending character.
        character: char,
        /// One-based row of the character.
        row: usize,
        /// One-based column of the character.
        column: usize,
    },
    /// The field has an even width or an even number of rows.
    #[error("The vessel cannot be the center of the input field! ({width}x{rows})")]
    VesselNotCentered {
        /// Number of cells per row.
        width: usize,
        /// Number of rows.
        rows: usize,
    },
    /// The field is too large to address with signed 32-bit coordinates.
    #[error("The field file is too large ({width}x{rows})")]
    FieldTooLarge {
        /// Number of cells per row.
        width: usize,
        /// Number of rows.
        rows: usize,
    },
}

/// Mines and vessel start position parsed from a field file.
///
/// Row `r` from the top sits at `y = -r` and column `c` at `x = c`, so the
/// vessel starts at `(width / 2, -(rows / 2))`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldLayout {
    mines: Vec<(ColumnCoord, i32)>,
    vessel: ColumnCoord,
}

impl FieldLayout {
    /// Parses the textual field representation.
    pub(crate) fn parse(source: &str) -> Result<Self, LoadError> {
        if source.trim().is_empty() {
            return Err(LoadError::UnequalRowLengths);
        }

        let mut width = None;
        let mut rows = 0_usize;
        let mut mines = Vec::new();

        for (row, line) in source.lines().enumerate() {
            let length = line.chars().count();
            match width {
                None => width = Some(length),
                Some(expected) if expected != length => return Err(LoadError::UnequalRowLengths),
                Some(_) => {}
            }

            for (column, glyph) in line.chars().enumerate() {
                if glyph == EMPTY_CELL {
                    continue;
                }
                let depth = depth_for_glyph(glyph).ok_or(LoadError::InvalidFieldCharacter {
                    character: glyph,
                    row: row + 1,
                    column: column + 1,
                })?;
                mines.push((column, row, depth));
            }
            rows += 1;
        }

        let width = width.unwrap_or(0);
        if width % 2 == 0 || rows % 2 == 0 {
            return Err(LoadError::VesselNotCentered { width, rows });
        }

        let too_large = || LoadError::FieldTooLarge { width, rows };
        let (Ok(x_limit), Ok(y_limit)) = (i32::try_from(width), i32::try_from(rows)) else {
            return Err(too_large());
        };

        let mines = mines
            .into_iter()
            .map(|(column, row, depth)| {
                let x = i32::try_from(column).map_err(|_| too_large())?;
                let y = i32::try_from(row).map_err(|_| too_large())?;
                Ok((ColumnCoord::new(x, -y), depth))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(Self {
            mines,
            vessel: ColumnCoord::new(x_limit / 2, -(y_limit / 2)),
        })
    }

    /// Commands that populate a world with this layout: mines first, then the vessel.
    pub(crate) fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.mines
            .iter()
            .map(|&(column, depth)| Command::PlaceMine { column, depth })
            .chain(std::iter::once(Command::PlaceVessel {
                column: self.vessel,
            }))
    }

    /// Builds a fresh world holding this layout.
    pub(crate) fn build_world(&self) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        for command in self.commands() {
            world::apply(&mut world, command, &mut events);
        }
        world
    }
}

/// Depth encoded by a field letter: `a..z` map to -1..-26 and `A..Z` to -27..-52.
pub(crate) fn depth_for_glyph(glyph: char) -> Option<i32> {
    match glyph {
        'a'..='z' => Some(-(glyph as i32 - 'a' as i32 + LOWERCASE_DEPTH_OFFSET)),
        'A'..='Z' => Some(-(glyph as i32 - 'A' as i32 + UPPERCASE_DEPTH_OFFSET)),
        _ => None,
    }
}

/// Reads and parses a field file.
pub(crate) fn read_field(path: &Path) -> Result<FieldLayout, LoadError> {
    FieldLayout::parse(&read_source(path)?)
}

/// Reads a script file, one step per line.
pub(crate) fn read_script(path: &Path) -> Result<Script, LoadError> {
    Ok(Script::parse(&read_source(path)?))
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => LoadError::Missing { path, source },
            _ => LoadError::Unreadable { path, source },
        }
    })
}
