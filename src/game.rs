//! Game state machine: placement, alternating combat, finish.

use alloc::vec::Vec;
use core::mem;
use log::{debug, info};
use rand::Rng;

use crate::board::Board;
use crate::common::{Cell, Coord, GameError, Outcome, PlayerId};
use crate::config::{GameConfig, TurnRule};
use crate::fleet::{Fleet, FleetAssembler, ReadyBoard};
use crate::placement::Placement;
use crate::shot::resolve_shot;

/// Phase of a game. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placing,
    Combat,
    Finished,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub shooter: PlayerId,
    pub target: Coord,
    pub outcome: Outcome,
    pub sunk_ship_length: Option<usize>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// The turn passed to the opponent.
    pub switch_turn: bool,
}

/// Everything one player may see of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub player: PlayerId,
    pub phase: Phase,
    /// Player to move; only set during combat.
    pub turn: Option<PlayerId>,
    pub your_turn: bool,
    pub winner: Option<PlayerId>,
    pub own_board: Vec<Vec<Cell>>,
    /// Opponent board with unhit ship cells hidden.
    pub opponent_board: Vec<Vec<Cell>>,
    pub remaining_fleet: Vec<usize>,
    pub opponent_ready: bool,
    pub shots_fired: usize,
    pub hits: usize,
    pub opponent_hits: usize,
    /// Lengths of the viewer's ships still afloat, longest first.
    pub own_afloat: Vec<usize>,
    /// Lengths of the opponent's ships still afloat, longest first. Before
    /// the opponent is ready this is the full fleet.
    pub opponent_afloat: Vec<usize>,
}

#[derive(Debug, Clone)]
enum Layout {
    Placing(FleetAssembler),
    Ready(ReadyBoard),
}

impl Layout {
    fn board(&self) -> &Board {
        match self {
            Layout::Placing(asm) => asm.board(),
            Layout::Ready(ready) => ready.board(),
        }
    }

    fn remaining(&self) -> &[usize] {
        match self {
            Layout::Placing(asm) => asm.remaining(),
            Layout::Ready(_) => &[],
        }
    }

    fn assembler(&mut self) -> Result<&mut FleetAssembler, GameError> {
        match self {
            Layout::Placing(asm) => Ok(asm),
            Layout::Ready(_) => Err(GameError::PlacementPhaseClosed),
        }
    }

    /// Freeze the board once the fleet is complete.
    fn promote(&mut self) {
        if let Layout::Placing(asm) = self {
            if asm.is_ready() {
                *self = match mem::take(asm).into_ready() {
                    Ok(ready) => Layout::Ready(ready),
                    Err(asm) => Layout::Placing(asm),
                };
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Seat {
    layout: Layout,
    shots: Vec<Coord>,
    hits: usize,
}

impl Seat {
    fn new(config: &GameConfig) -> Self {
        Seat {
            layout: Layout::Placing(FleetAssembler::with_fleet(
                Board::with_size(config.board_size),
                Fleet::from_lengths(&config.fleet),
            )),
            shots: Vec::new(),
            hits: 0,
        }
    }
}

/// One two-player game. All mutation goes through its methods; every
/// rejected call leaves the game exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    seats: [Seat; 2],
    phase: Phase,
    turn: PlayerId,
    winner: Option<PlayerId>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: GameConfig) -> Self {
        Self {
            turn: config.first_player,
            seats: [Seat::new(&config), Seat::new(&config)],
            phase: Phase::Placing,
            winner: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player to move during combat.
    pub fn turn(&self) -> Option<PlayerId> {
        (self.phase == Phase::Combat).then_some(self.turn)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The player's own board, unredacted.
    pub fn board(&self, player: PlayerId) -> &Board {
        self.seats[player.index()].layout.board()
    }

    pub fn remaining_fleet(&self, player: PlayerId) -> &[usize] {
        self.seats[player.index()].layout.remaining()
    }

    pub fn is_ready(&self, player: PlayerId) -> bool {
        matches!(self.seats[player.index()].layout, Layout::Ready(_))
    }

    /// Shots fired by `player`, in order.
    pub fn shots_fired(&self, player: PlayerId) -> &[Coord] {
        &self.seats[player.index()].shots
    }

    fn check_placing(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Placing => Ok(()),
            _ => Err(GameError::PlacementPhaseClosed),
        }
    }

    /// Validate and commit one ship for `player`. Returns the lengths that
    /// player still has to place.
    pub fn submit_placement(
        &mut self,
        player: PlayerId,
        placement: &Placement,
    ) -> Result<Vec<usize>, GameError> {
        self.check_placing()?;
        let remaining = self.seats[player.index()]
            .layout
            .assembler()?
            .submit_placement(placement)?
            .to_vec();
        debug!("{:?} placed {:?}, remaining {:?}", player, placement, remaining);
        self.after_placement(player);
        Ok(remaining)
    }

    /// Lay out the rest of `player`'s fleet at random.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<(), GameError> {
        self.check_placing()?;
        self.seats[player.index()]
            .layout
            .assembler()?
            .place_randomly(rng)?;
        debug!("{:?} placed fleet at random", player);
        self.after_placement(player);
        Ok(())
    }

    /// Discard `player`'s ships and restore the full fleet.
    pub fn reset_placement(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_placing()?;
        self.seats[player.index()].layout.assembler()?.reset()
    }

    fn after_placement(&mut self, player: PlayerId) {
        self.seats[player.index()].layout.promote();
        if self.is_ready(PlayerId::One) && self.is_ready(PlayerId::Two) {
            self.phase = Phase::Combat;
            self.turn = self.config.first_player;
            info!("both fleets ready, {:?} to move", self.turn);
        }
    }

    /// Fire at (row, col) on the opponent's board.
    pub fn make_move(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, GameError> {
        match self.phase {
            Phase::Placing => return Err(GameError::NotInCombatPhase),
            Phase::Finished => return Err(GameError::GameAlreadyFinished),
            Phase::Combat => {}
        }
        if player != self.turn {
            return Err(GameError::NotYourTurn);
        }
        let target = match &mut self.seats[player.opponent().index()].layout {
            Layout::Ready(ready) => ready,
            Layout::Placing(_) => return Err(GameError::NotInCombatPhase),
        };
        let report = resolve_shot(target, row, col)?;

        let seat = &mut self.seats[player.index()];
        seat.shots.push((row, col));
        if report.outcome == Outcome::Hit {
            seat.hits += 1;
        }

        let switch_turn = if report.fleet_defeated {
            self.phase = Phase::Finished;
            self.winner = Some(player);
            info!("{:?} sank the last ship and wins", player);
            false
        } else {
            !matches!(
                (self.config.turn_rule, report.outcome),
                (TurnRule::KeepOnHit, Outcome::Hit)
            )
        };
        if switch_turn {
            self.turn = player.opponent();
        }

        Ok(MoveOutcome {
            shooter: player,
            target: (row, col),
            outcome: report.outcome,
            sunk_ship_length: report.sunk_ship_length,
            game_over: report.fleet_defeated,
            winner: self.winner,
            switch_turn,
        })
    }

    /// State as seen by `player`.
    pub fn view(&self, player: PlayerId) -> PlayerView {
        let seat = &self.seats[player.index()];
        let opponent = player.opponent();
        PlayerView {
            player,
            phase: self.phase,
            turn: self.turn(),
            your_turn: self.turn() == Some(player),
            winner: self.winner,
            own_board: seat.layout.board().rows(),
            opponent_board: self.board(opponent).tracking_view(),
            remaining_fleet: seat.layout.remaining().to_vec(),
            opponent_ready: self.is_ready(opponent),
            shots_fired: seat.shots.len(),
            hits: seat.hits,
            opponent_hits: self.seats[opponent.index()].hits,
            own_afloat: self.afloat(player),
            opponent_afloat: if self.is_ready(opponent) {
                self.afloat(opponent)
            } else {
                Fleet::from_lengths(&self.config.fleet).remaining().to_vec()
            },
        }
    }

    /// Lengths of `player`'s committed ships not yet sunk, longest first.
    pub fn afloat(&self, player: PlayerId) -> Vec<usize> {
        let mut lengths = self.board(player).afloat_lengths();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_valid_config(GameConfig::default())
    }
}
