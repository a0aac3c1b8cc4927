//! Placement validation.
//!
//! A placement is legal when the ship fits inside the grid, covers only empty
//! cells, and no cell of its Moore neighbourhood belongs to another ship.
//! Ships may not touch, not even diagonally.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{Cell, Coord, GameError, Orientation};

/// Candidate ship position awaiting validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub length: usize,
}

impl Placement {
    pub fn new(row: usize, col: usize, orientation: Orientation, length: usize) -> Self {
        Self {
            row,
            col,
            orientation,
            length,
        }
    }

    pub fn horizontal(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Orientation::Horizontal, length)
    }

    pub fn vertical(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Orientation::Vertical, length)
    }

    /// Cells the ship would occupy, without any bounds check.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length).map(move |i| self.orientation.step((self.row, self.col), i))
    }

    /// Check this placement against `board` and return the cells it would
    /// occupy. The board is not modified.
    pub fn validate(&self, board: &Board) -> Result<Vec<Coord>, GameError> {
        validate_placement(board, self)
    }
}

/// Decide whether `placement` is legal on `board`.
pub fn validate_placement(board: &Board, placement: &Placement) -> Result<Vec<Coord>, GameError> {
    if placement.length == 0 {
        return Err(GameError::UnknownShipLength);
    }
    let size = board.size();
    let (row, col) = (placement.row, placement.col);
    let ends_inside = |start: usize| {
        start
            .checked_add(placement.length)
            .is_some_and(|end| end <= size)
    };
    let fits = match placement.orientation {
        Orientation::Horizontal => row < size && ends_inside(col),
        Orientation::Vertical => col < size && ends_inside(row),
    };
    if !fits {
        return Err(GameError::OutOfBounds { row, col });
    }

    let cells: Vec<Coord> = placement.cells().collect();

    for &(r, c) in &cells {
        if board.cell_state(r, c)? != Cell::Empty {
            return Err(GameError::Overlap);
        }
    }

    for &(r, c) in &cells {
        for (nr, nc) in neighbours(size, r, c) {
            if board.cell_state(nr, nc)? == Cell::Ship && !cells.contains(&(nr, nc)) {
                return Err(GameError::Touching);
            }
        }
    }

    Ok(cells)
}

/// Every legal placement of a ship of `length` on `board`.
pub fn legal_placements(board: &Board, length: usize) -> Vec<Placement> {
    let size = board.size();
    let mut out = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        for row in 0..size {
            for col in 0..size {
                let candidate = Placement::new(row, col, orientation, length);
                if validate_placement(board, &candidate).is_ok() {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

/// In-grid cells of the Moore neighbourhood around (row, col).
fn neighbours(size: usize, row: usize, col: usize) -> impl Iterator<Item = Coord> {
    let rows = row.saturating_sub(1)..=(row + 1).min(size - 1);
    rows.flat_map(move |r| {
        let cols = col.saturating_sub(1)..=(col + 1).min(size - 1);
        cols.map(move |c| (r, c))
    })
    .filter(move |&rc| rc != (row, col))
}
