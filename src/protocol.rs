#![cfg(feature = "std")]

//! Transport-agnostic request/response messages and the API they drive.
//!
//! A transport decodes a [`Request`], hands it to [`handle`] together with
//! something implementing [`GameApi`], and encodes the [`Response`].

use serde::{Deserialize, Serialize};

use crate::common::GameError;
use crate::game::{MoveOutcome, PlayerView};
use crate::placement::Placement;
use crate::session::{PlayerToken, SessionId, SessionStore};

/// Version of the request/response format.
pub const PROTOCOL_VERSION: u16 = 1;

/// Operations a client may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    CreateSession,
    JoinSession {
        session: SessionId,
    },
    SubmitPlacement {
        session: SessionId,
        token: PlayerToken,
        placement: Placement,
    },
    RandomizePlacement {
        session: SessionId,
        token: PlayerToken,
    },
    ResetPlacement {
        session: SessionId,
        token: PlayerToken,
    },
    MakeMove {
        session: SessionId,
        token: PlayerToken,
        row: usize,
        col: usize,
    },
    GetState {
        session: SessionId,
        token: PlayerToken,
    },
}

/// Replies to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    SessionCreated {
        session: SessionId,
        token: PlayerToken,
    },
    Joined {
        token: PlayerToken,
    },
    /// Ship lengths the caller still has to place.
    RemainingFleet(Vec<usize>),
    Move(MoveOutcome),
    State(Box<PlayerView>),
    /// Rejected request. `error` is set for rules rejections.
    Error {
        error: Option<GameError>,
        message: String,
    },
}

impl Response {
    fn from_error(err: anyhow::Error) -> Self {
        Response::Error {
            error: err.downcast_ref::<GameError>().copied(),
            message: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

/// The operations a game server exposes to its transports.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn create_session(&self) -> anyhow::Result<(SessionId, PlayerToken)>;
    async fn join_session(&self, session: &str) -> anyhow::Result<PlayerToken>;
    async fn submit_placement(
        &self,
        session: &str,
        token: &str,
        placement: Placement,
    ) -> anyhow::Result<Vec<usize>>;
    async fn randomize_placement(&self, session: &str, token: &str) -> anyhow::Result<Vec<usize>>;
    async fn reset_placement(&self, session: &str, token: &str) -> anyhow::Result<Vec<usize>>;
    async fn make_move(
        &self,
        session: &str,
        token: &str,
        row: usize,
        col: usize,
    ) -> anyhow::Result<MoveOutcome>;
    async fn get_state(&self, session: &str, token: &str) -> anyhow::Result<PlayerView>;
}

#[async_trait::async_trait]
impl GameApi for SessionStore {
    async fn create_session(&self) -> anyhow::Result<(SessionId, PlayerToken)> {
        Ok(SessionStore::create_session(self)?)
    }

    async fn join_session(&self, session: &str) -> anyhow::Result<PlayerToken> {
        Ok(SessionStore::join_session(self, session)?)
    }

    async fn submit_placement(
        &self,
        session: &str,
        token: &str,
        placement: Placement,
    ) -> anyhow::Result<Vec<usize>> {
        Ok(SessionStore::submit_placement(self, session, token, &placement)?)
    }

    async fn randomize_placement(&self, session: &str, token: &str) -> anyhow::Result<Vec<usize>> {
        Ok(SessionStore::randomize_placement(self, session, token)?)
    }

    async fn reset_placement(&self, session: &str, token: &str) -> anyhow::Result<Vec<usize>> {
        Ok(SessionStore::reset_placement(self, session, token)?)
    }

    async fn make_move(
        &self,
        session: &str,
        token: &str,
        row: usize,
        col: usize,
    ) -> anyhow::Result<MoveOutcome> {
        Ok(SessionStore::make_move(self, session, token, row, col)?)
    }

    async fn get_state(&self, session: &str, token: &str) -> anyhow::Result<PlayerView> {
        Ok(SessionStore::get_state(self, session, token)?)
    }
}

/// Execute one request against `api`.
pub async fn handle<A: GameApi + ?Sized>(api: &A, request: Request) -> Response {
    let result = match request {
        Request::CreateSession => api
            .create_session()
            .await
            .map(|(session, token)| Response::SessionCreated { session, token }),
        Request::JoinSession { session } => api
            .join_session(&session)
            .await
            .map(|token| Response::Joined { token }),
        Request::SubmitPlacement {
            session,
            token,
            placement,
        } => api
            .submit_placement(&session, &token, placement)
            .await
            .map(Response::RemainingFleet),
        Request::RandomizePlacement { session, token } => api
            .randomize_placement(&session, &token)
            .await
            .map(Response::RemainingFleet),
        Request::ResetPlacement { session, token } => api
            .reset_placement(&session, &token)
            .await
            .map(Response::RemainingFleet),
        Request::MakeMove {
            session,
            token,
            row,
            col,
        } => api
            .make_move(&session, &token, row, col)
            .await
            .map(Response::Move),
        Request::GetState { session, token } => api
            .get_state(&session, &token)
            .await
            .map(|view| Response::State(Box::new(view))),
    };
    result.unwrap_or_else(Response::from_error)
}
