//! Common types for the rules engine: cells, coordinates, players and errors.

/// Board coordinate as `(row, col)`.
pub type Coord = (usize, usize);

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// `Hit` and `Miss` never change once set.
    pub fn is_targeted(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }

    /// What the opponent is allowed to see of this cell.
    pub fn redacted(self) -> Cell {
        match self {
            Cell::Ship => Cell::Empty,
            other => other,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '~',
            Cell::Ship => 'S',
            Cell::Hit => 'X',
            Cell::Miss => 'O',
        }
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from `origin` along this axis.
    pub fn step(self, origin: Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => (origin.0, origin.1 + offset),
            Orientation::Vertical => (origin.0 + offset, origin.1),
        }
    }
}

/// One of the two seats in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Result of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Hit,
    Miss,
}

/// Rejections returned by rules operations. None of them change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    /// Coordinate or ship extent falls outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship would cover a cell that is not empty.
    Overlap,
    /// Ship would touch another ship, diagonals included.
    Touching,
    /// Cell has already been fired at.
    AlreadyTargeted,
    /// Length is not among the ships still to place.
    UnknownShipLength,
    /// Fleet is complete or the game has left the placement phase.
    PlacementPhaseClosed,
    /// Shots are only accepted once both fleets are ready.
    NotInCombatPhase,
    /// The other player is to move.
    NotYourTurn,
    /// The game already has a winner.
    GameAlreadyFinished,
    /// Both seats are taken.
    SessionFull,
    /// No session with that id.
    NotFound,
    /// Token does not belong to a player of this session.
    UnknownPlayer,
    /// Random layout gave up after too many attempts.
    UnableToPlaceFleet,
    /// Board size or fleet cannot produce a playable game.
    InvalidConfig,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "Position ({}, {}) is outside the board", row, col)
            }
            GameError::Overlap => write!(f, "Ship placement overlaps another ship"),
            GameError::Touching => write!(f, "Ship placement touches another ship"),
            GameError::AlreadyTargeted => write!(f, "Already fired at this target"),
            GameError::UnknownShipLength => write!(f, "No ship of that length left to place"),
            GameError::PlacementPhaseClosed => write!(f, "Ship placement is closed"),
            GameError::NotInCombatPhase => write!(f, "Both fleets must be placed before firing"),
            GameError::NotYourTurn => write!(f, "Not your turn"),
            GameError::GameAlreadyFinished => write!(f, "Game is already finished"),
            GameError::SessionFull => write!(f, "Game already has two players"),
            GameError::NotFound => write!(f, "Game not found"),
            GameError::UnknownPlayer => write!(f, "Unknown player"),
            GameError::UnableToPlaceFleet => write!(f, "Unable to place fleet"),
            GameError::InvalidConfig => write!(f, "Invalid game configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
