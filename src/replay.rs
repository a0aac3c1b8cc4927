#![cfg(feature = "std")]

//! Batch replay of recorded games.
//!
//! Steps refer to sessions by creation order and to players by seat, so a
//! log does not depend on the ids and tokens a store happens to generate.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::common::{GameError, PlayerId};
use crate::config::GameConfig;
use crate::placement::Placement;
use crate::protocol::{handle, GameApi, Request, Response, PROTOCOL_VERSION};
use crate::session::{PlayerToken, SessionId, SessionStore};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Create,
    Join {
        session: usize,
    },
    Place {
        session: usize,
        player: PlayerId,
        placement: Placement,
    },
    Randomize {
        session: usize,
        player: PlayerId,
    },
    Reset {
        session: usize,
        player: PlayerId,
    },
    Move {
        session: usize,
        player: PlayerId,
        row: usize,
        col: usize,
    },
    State {
        session: usize,
        player: PlayerId,
    },
}

/// A store seed, its configuration and the steps to run against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub version: u16,
    pub seed: u64,
    pub config: GameConfig,
    pub steps: Vec<Step>,
}

impl ReplayLog {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            seed,
            config,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn to_bincode(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bincode(bytes: &[u8]) -> anyhow::Result<Self> {
        let log: ReplayLog = bincode::deserialize(bytes)?;
        log.check_version()?;
        Ok(log)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let log: ReplayLog = serde_json::from_str(text)?;
        log.check_version()?;
        Ok(log)
    }

    fn check_version(&self) -> anyhow::Result<()> {
        if self.version != PROTOCOL_VERSION {
            return Err(anyhow!(
                "Replay version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                self.version
            ));
        }
        Ok(())
    }

    /// Run every step against a fresh store seeded from the log.
    pub async fn run(&self) -> anyhow::Result<Vec<Response>> {
        let store = SessionStore::with_seed(self.config.clone(), self.seed)?;
        let mut replayer = Replayer::new(store);
        let mut responses = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            responses.push(replayer.apply(step).await);
        }
        Ok(responses)
    }
}

#[derive(Debug)]
struct SessionSeats {
    id: SessionId,
    tokens: [Option<PlayerToken>; 2],
}

/// Translates steps into requests, remembering the ids and tokens handed out.
pub struct Replayer<A: GameApi> {
    api: A,
    sessions: Vec<SessionSeats>,
}

impl<A: GameApi> Replayer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            sessions: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn seat(&self, session: usize, player: PlayerId) -> Result<(SessionId, PlayerToken), GameError> {
        let seats = self.sessions.get(session).ok_or(GameError::NotFound)?;
        let token = seats.tokens[player.index()]
            .clone()
            .ok_or(GameError::UnknownPlayer)?;
        Ok((seats.id.clone(), token))
    }

    fn request(&self, step: &Step) -> Result<Request, GameError> {
        let request = match *step {
            Step::Create => Request::CreateSession,
            Step::Join { session } => Request::JoinSession {
                session: self
                    .sessions
                    .get(session)
                    .ok_or(GameError::NotFound)?
                    .id
                    .clone(),
            },
            Step::Place {
                session,
                player,
                placement,
            } => {
                let (session, token) = self.seat(session, player)?;
                Request::SubmitPlacement {
                    session,
                    token,
                    placement,
                }
            }
            Step::Randomize { session, player } => {
                let (session, token) = self.seat(session, player)?;
                Request::RandomizePlacement { session, token }
            }
            Step::Reset { session, player } => {
                let (session, token) = self.seat(session, player)?;
                Request::ResetPlacement { session, token }
            }
            Step::Move {
                session,
                player,
                row,
                col,
            } => {
                let (session, token) = self.seat(session, player)?;
                Request::MakeMove {
                    session,
                    token,
                    row,
                    col,
                }
            }
            Step::State { session, player } => {
                let (session, token) = self.seat(session, player)?;
                Request::GetState { session, token }
            }
        };
        Ok(request)
    }

    /// Execute one step and return the server's response.
    pub async fn apply(&mut self, step: &Step) -> Response {
        let request = match self.request(step) {
            Ok(request) => request,
            Err(err) => {
                return Response::Error {
                    error: Some(err),
                    message: err.to_string(),
                }
            }
        };
        let response = handle(&self.api, request).await;
        match (step, &response) {
            (Step::Create, Response::SessionCreated { session, token }) => {
                self.sessions.push(SessionSeats {
                    id: session.clone(),
                    tokens: [Some(token.clone()), None],
                });
            }
            (Step::Join { session }, Response::Joined { token }) => {
                if let Some(seats) = self.sessions.get_mut(*session) {
                    seats.tokens[PlayerId::Two.index()] = Some(token.clone());
                }
            }
            _ => {}
        }
        response
    }
}
