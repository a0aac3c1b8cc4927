//! Board state: a square grid of cells plus the ships committed to it.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Cell, Coord, GameError, Orientation, Outcome};
use crate::config::{BOARD_SIZE, MAX_BOARD_SIZE};
use crate::ship::Ship;

/// A player's own board. Cells are stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty standard-size board.
    pub fn new() -> Self {
        Self::with_size(BOARD_SIZE)
    }

    /// Create an empty `size`×`size` board. `size` is capped at
    /// `MAX_BOARD_SIZE`; a zero-sized board has no cells at all.
    pub fn with_size(size: usize) -> Self {
        let size = size.min(MAX_BOARD_SIZE);
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if self.in_bounds(row, col) {
            Ok(row * self.size + col)
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// State of the cell at (row, col).
    pub fn cell_state(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    /// Ships committed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ship occupying (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(row, col))
    }

    /// A ship is sunk once every one of its cells is `Hit`.
    pub fn is_sunk(&self, ship: &Ship) -> bool {
        ship.cells()
            .iter()
            .all(|&(r, c)| self.cells[r * self.size + c] == Cell::Hit)
    }

    /// Returns `true` when at least one ship is placed and all are sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| self.is_sunk(s))
    }

    /// Lengths of the ships still afloat.
    pub fn afloat_lengths(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !self.is_sunk(s))
            .map(Ship::length)
            .collect()
    }

    /// Commit a ship. All cells are checked before any is written.
    pub(crate) fn set_ship_cells(
        &mut self,
        cells: Vec<Coord>,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        for &(r, c) in &cells {
            let idx = self.check_bounds(r, c)?;
            if self.cells[idx] != Cell::Empty {
                return Err(GameError::Overlap);
            }
        }
        for &(r, c) in &cells {
            self.cells[r * self.size + c] = Cell::Ship;
        }
        self.ships.push(Ship::new(cells, orientation));
        Ok(())
    }

    /// Record a shot. Targeted cells are terminal.
    pub(crate) fn mark_shot(
        &mut self,
        row: usize,
        col: usize,
        outcome: Outcome,
    ) -> Result<(), GameError> {
        let idx = self.check_bounds(row, col)?;
        let current = self.cells[idx];
        if current.is_targeted() {
            return Err(GameError::AlreadyTargeted);
        }
        debug_assert_eq!(current == Cell::Ship, outcome == Outcome::Hit);
        self.cells[idx] = match outcome {
            Outcome::Hit => Cell::Hit,
            Outcome::Miss => Cell::Miss,
        };
        Ok(())
    }

    /// Remove every ship and shot.
    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);
        self.ships.clear();
    }

    fn grid(&self) -> core::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.size.max(1))
    }

    /// Full grid, row by row, as the owner sees it.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.grid().map(|r| r.to_vec()).collect()
    }

    /// Grid as the opponent sees it: ship cells that were not hit are hidden.
    pub fn tracking_view(&self) -> Vec<Vec<Cell>> {
        self.grid()
            .map(|r| r.iter().map(|c| c.redacted()).collect())
            .collect()
    }

    /// Coordinates not yet fired at.
    pub fn untargeted(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_targeted())
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid().enumerate() {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?} }}", self.size, self.ships)?;
        writeln!(f, "{}", self)
    }
}
