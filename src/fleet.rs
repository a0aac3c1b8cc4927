//! Fleet assembly: drives placements until the required fleet is on the board.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::GameError;
use crate::config::{FLEET, MAX_LAYOUT_ATTEMPTS};
use crate::placement::{legal_placements, validate_placement, Placement};
use crate::ship::Ship;

/// Multiset of ship lengths still to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    remaining: Vec<usize>,
}

impl Fleet {
    /// The standard five-ship fleet.
    pub fn standard() -> Self {
        Self::from_lengths(&FLEET)
    }

    pub fn from_lengths(lengths: &[usize]) -> Self {
        let mut remaining = lengths.to_vec();
        remaining.sort_unstable_by(|a, b| b.cmp(a));
        Self { remaining }
    }

    /// Remaining lengths, longest first.
    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn contains(&self, length: usize) -> bool {
        self.remaining.contains(&length)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remove one instance of `length`. Returns `false` if none is left.
    fn take(&mut self, length: usize) -> bool {
        match self.remaining.iter().position(|&l| l == length) {
            Some(idx) => {
                self.remaining.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Owns a board during the placement phase and enforces the fleet
/// composition. Once every ship is placed the board is ready and frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetAssembler {
    board: Board,
    required: Fleet,
    remaining: Fleet,
}

impl FleetAssembler {
    /// Standard board and fleet.
    pub fn new() -> Self {
        Self::with_fleet(Board::new(), Fleet::standard())
    }

    pub fn with_fleet(board: Board, required: Fleet) -> Self {
        Self {
            board,
            remaining: required.clone(),
            required,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Lengths still to place, longest first.
    pub fn remaining(&self) -> &[usize] {
        self.remaining.remaining()
    }

    pub fn is_ready(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Validate and commit one ship. Returns the lengths still to place.
    /// A rejected placement leaves the assembler untouched.
    pub fn submit_placement(&mut self, placement: &Placement) -> Result<&[usize], GameError> {
        if self.is_ready() {
            return Err(GameError::PlacementPhaseClosed);
        }
        if !self.remaining.contains(placement.length) {
            return Err(GameError::UnknownShipLength);
        }
        let cells = validate_placement(&self.board, placement)?;
        self.board.set_ship_cells(cells, placement.orientation)?;
        self.remaining.take(placement.length);
        Ok(self.remaining.remaining())
    }

    /// Discard every committed ship and start the layout over.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.is_ready() {
            return Err(GameError::PlacementPhaseClosed);
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.board.clear();
        self.remaining = self.required.clone();
    }

    /// Place every remaining ship at random legal positions, longest first,
    /// around the ships already committed. Each attempt works on a scratch
    /// copy, so a failure leaves the assembler as it was.
    pub fn place_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.is_ready() {
            return Err(GameError::PlacementPhaseClosed);
        }
        for _ in 0..MAX_LAYOUT_ATTEMPTS {
            let mut scratch = self.clone();
            if scratch.try_layout(rng)? {
                *self = scratch;
                return Ok(());
            }
        }
        Err(GameError::UnableToPlaceFleet)
    }

    fn try_layout<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, GameError> {
        while let Some(&length) = self.remaining.remaining().first() {
            let candidates = legal_placements(&self.board, length);
            match candidates.choose(rng) {
                Some(placement) => {
                    self.submit_placement(placement)?;
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Finish placement. Hands the assembler back while ships remain.
    pub fn into_ready(self) -> Result<ReadyBoard, Self> {
        if !self.is_ready() {
            return Err(self);
        }
        Ok(ReadyBoard { board: self.board })
    }
}

impl Default for FleetAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// A board whose fleet is complete. Ships can no longer be added; only shots
/// change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyBoard {
    board: Board,
}

impl ReadyBoard {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn ships(&self) -> &[Ship] {
        self.board.ships()
    }
}
