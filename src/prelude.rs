//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Cell, Coord, FleetAssembler, Game, GameConfig, GameError, MoveOutcome, Orientation,
    Outcome, Phase, Placement, PlayerId, PlayerView, TurnRule,
};

#[cfg(feature = "std")]
pub use crate::{handle, GameApi, Request, Response, SessionStore};
