//! Rule constants and per-game configuration.

use alloc::vec::Vec;

use crate::common::{GameError, PlayerId};

pub const BOARD_SIZE: usize = 10;
/// Largest board side a game may be configured with.
pub const MAX_BOARD_SIZE: usize = 26;
pub const NUM_SHIPS: usize = 5;

/// Required fleet, longest first, with the class name shown to players.
pub const SHIP_CLASSES: [(&str, usize); NUM_SHIPS] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 3),
    ("Destroyer", 2),
];

/// Ship lengths of the standard fleet.
pub const FLEET: [usize; NUM_SHIPS] = [5, 4, 3, 3, 2];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

const fn fleet_cells(fleet: &[usize]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i];
        i += 1;
    }
    total
}

/// Attempts `FleetAssembler::place_randomly` makes before giving up.
pub const MAX_LAYOUT_ATTEMPTS: usize = 100;

/// Class name of the first standard ship with the given length.
pub fn ship_class_name(length: usize) -> Option<&'static str> {
    SHIP_CLASSES
        .iter()
        .find(|(_, len)| *len == length)
        .map(|(name, _)| *name)
}

/// Whether the turn passes to the opponent after a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnRule {
    /// Every shot that does not end the game hands the turn over.
    #[default]
    Alternate,
    /// A hit earns another shot; only a miss hands the turn over.
    KeepOnHit,
}

/// Settings fixed when a game is created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<usize>,
    pub first_player: PlayerId,
    pub turn_rule: TurnRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            first_player: PlayerId::One,
            turn_rule: TurnRule::Alternate,
        }
    }
}

impl GameConfig {
    /// Reject configurations no game could be played with.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_BOARD_SIZE).contains(&self.board_size) || self.fleet.is_empty() {
            return Err(GameError::InvalidConfig);
        }
        if self
            .fleet
            .iter()
            .any(|&len| len == 0 || len > self.board_size)
        {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}
