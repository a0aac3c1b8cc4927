#![cfg_attr(not(feature = "std"), no_std)]

//! Rules engine for two-player Battleship.
//!
//! The core (`board`, `placement`, `fleet`, `shot`, `game`) is `no_std` with
//! `alloc`. The `std` feature adds the session store, the request/response
//! seam for transports, batch replay and self-play simulation.

extern crate alloc;

mod board;
mod common;
mod config;
mod fleet;
mod game;
mod placement;
mod ship;
mod shot;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod replay;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod sim;
pub mod prelude;

pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use placement::*;
pub use ship::*;
pub use shot::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{handle, GameApi, Request, Response, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use replay::{ReplayLog, Replayer, Step};
#[cfg(feature = "std")]
pub use session::{PlayerToken, SessionId, SessionStore};
#[cfg(feature = "std")]
pub use sim::{simulate, SimReport};
