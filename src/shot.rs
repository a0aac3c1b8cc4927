//! Shot resolution against a ready board.

use crate::common::{Cell, GameError, Outcome};
use crate::fleet::ReadyBoard;

/// What a single shot did to the target board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub outcome: Outcome,
    /// Length of the ship this shot sank. Not disclosed for plain hits.
    pub sunk_ship_length: Option<usize>,
    /// Every ship on the target board is now sunk.
    pub fleet_defeated: bool,
}

impl ShotReport {
    pub fn sunk(&self) -> bool {
        self.sunk_ship_length.is_some()
    }
}

/// Fire at (row, col) on `target`. Rejected shots leave the board unchanged.
pub fn resolve_shot(target: &mut ReadyBoard, row: usize, col: usize) -> Result<ShotReport, GameError> {
    let board = target.board_mut();
    match board.cell_state(row, col)? {
        Cell::Hit | Cell::Miss => Err(GameError::AlreadyTargeted),
        Cell::Empty => {
            board.mark_shot(row, col, Outcome::Miss)?;
            Ok(ShotReport {
                outcome: Outcome::Miss,
                sunk_ship_length: None,
                fleet_defeated: false,
            })
        }
        Cell::Ship => {
            board.mark_shot(row, col, Outcome::Hit)?;
            let sunk_ship_length = board
                .ship_at(row, col)
                .filter(|ship| board.is_sunk(ship))
                .map(|ship| ship.length());
            Ok(ShotReport {
                outcome: Outcome::Hit,
                sunk_ship_length,
                fleet_defeated: sunk_ship_length.is_some() && board.all_sunk(),
            })
        }
    }
}
