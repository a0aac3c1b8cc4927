//! Committed ships.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, Orientation};
use crate::config::ship_class_name;

/// A ship committed to a board. Its cells never change after placement.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    cells: Vec<Coord>,
    orientation: Orientation,
}

impl Ship {
    pub(crate) fn new(cells: Vec<Coord>, orientation: Orientation) -> Self {
        Self { cells, orientation }
    }

    /// Occupied cells, in order from the origin.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Class name for standard lengths, e.g. "Battleship" for 4.
    pub fn class_name(&self) -> Option<&'static str> {
        ship_class_name(self.length())
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: {:?}, orientation: {:?} }}",
            self.length(),
            self.origin(),
            self.orientation,
        )
    }
}
