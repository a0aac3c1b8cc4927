#![cfg(feature = "std")]

//! Server-side session store.
//!
//! Each session sits behind its own mutex, so operations on one game are
//! serialized while different games proceed in parallel. The outer map lock
//! is only held long enough to look a session up, insert or remove it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::{GameError, PlayerId};
use crate::config::GameConfig;
use crate::game::{Game, MoveOutcome, PlayerView};
use crate::placement::Placement;

pub type SessionId = String;
pub type PlayerToken = String;

struct Session {
    game: Game,
    tokens: [Option<PlayerToken>; 2],
}

impl Session {
    fn player(&self, token: &str) -> Result<PlayerId, GameError> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|p| self.tokens[p.index()].as_deref() == Some(token))
            .ok_or(GameError::UnknownPlayer)
    }
}

/// All live games, keyed by session id.
pub struct SessionStore {
    config: GameConfig,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    rng: Mutex<SmallRng>,
}

impl SessionStore {
    /// Store for standard games with ids drawn from the thread RNG.
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::build(GameConfig::default(), SmallRng::from_rng(&mut seed_rng))
    }

    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut seed_rng = rand::rng();
        Ok(Self::build(config, SmallRng::from_rng(&mut seed_rng)))
    }

    /// Deterministic ids, tokens and random layouts, for replay and tests.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config, SmallRng::seed_from_u64(seed)))
    }

    fn build(config: GameConfig, rng: SmallRng) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn token(&self) -> PlayerToken {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        format!("{:016x}", rng.random::<u64>())
    }

    fn session(&self, id: &str) -> Result<Arc<Mutex<Session>>, GameError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or(GameError::NotFound)
    }

    /// Run `op` as the player owning `token`, holding the session lock.
    fn with_player<T>(
        &self,
        id: &str,
        token: &str,
        op: impl FnOnce(&mut Game, PlayerId) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let session = self.session(id)?;
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        let session = &mut *guard;
        let player = session.player(token)?;
        op(&mut session.game, player)
    }

    /// Open a new game and seat its creator as player one.
    pub fn create_session(&self) -> Result<(SessionId, PlayerToken), GameError> {
        let game = Game::new(self.config.clone())?;
        let token = self.token();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let id = loop {
            let candidate = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                format!("{:08x}", rng.random::<u32>())
            };
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(
            id.clone(),
            Arc::new(Mutex::new(Session {
                game,
                tokens: [Some(token.clone()), None],
            })),
        );
        info!("session {} created", id);
        Ok((id, token))
    }

    /// Seat a second player.
    pub fn join_session(&self, id: &str) -> Result<PlayerToken, GameError> {
        let session = self.session(id)?;
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        let seat = &mut guard.tokens[PlayerId::Two.index()];
        if seat.is_some() {
            return Err(GameError::SessionFull);
        }
        let token = self.token();
        *seat = Some(token.clone());
        info!("session {}: second player joined", id);
        Ok(token)
    }

    pub fn submit_placement(
        &self,
        id: &str,
        token: &str,
        placement: &Placement,
    ) -> Result<Vec<usize>, GameError> {
        self.with_player(id, token, |game, player| {
            game.submit_placement(player, placement)
        })
    }

    /// Lay out the caller's remaining ships at random. Returns the remaining
    /// fleet, which is then empty.
    pub fn randomize_placement(&self, id: &str, token: &str) -> Result<Vec<usize>, GameError> {
        self.with_player(id, token, |game, player| {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            game.place_randomly(player, &mut *rng)?;
            Ok(game.remaining_fleet(player).to_vec())
        })
    }

    /// Clear the caller's layout. Returns the restored fleet.
    pub fn reset_placement(&self, id: &str, token: &str) -> Result<Vec<usize>, GameError> {
        self.with_player(id, token, |game, player| {
            game.reset_placement(player)?;
            debug!("session {}: {:?} reset placement", id, player);
            Ok(game.remaining_fleet(player).to_vec())
        })
    }

    pub fn make_move(
        &self,
        id: &str,
        token: &str,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, GameError> {
        self.with_player(id, token, |game, player| {
            let outcome = game.make_move(player, row, col)?;
            debug!("session {}: {:?}", id, outcome);
            if outcome.game_over {
                info!("session {}: {:?} won", id, player);
            }
            Ok(outcome)
        })
    }

    pub fn get_state(&self, id: &str, token: &str) -> Result<PlayerView, GameError> {
        self.with_player(id, token, |game, player| Ok(game.view(player)))
    }

    /// Drop a session. Returns `false` if it did not exist.
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            info!("session {} removed", id);
        }
        removed
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
