#![cfg(feature = "std")]

//! Self-play: two random shooters play one full game through the session API.

use anyhow::anyhow;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::common::{Cell, Coord, PlayerId};
use crate::config::GameConfig;
use crate::game::PlayerView;
use crate::protocol::{GameApi, Response};
use crate::replay::{ReplayLog, Replayer, Step};
use crate::session::SessionStore;

/// Summary of a simulated game.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub winner: Option<PlayerId>,
    pub shots: [usize; 2],
    pub hits: [usize; 2],
    /// Every state-changing step, replayable with the same seed.
    pub log: ReplayLog,
}

fn expect_ok(response: Response) -> anyhow::Result<Response> {
    match response {
        Response::Error { message, .. } => Err(anyhow!(message)),
        other => Ok(other),
    }
}

async fn view<A: GameApi>(replayer: &mut Replayer<A>, player: PlayerId) -> anyhow::Result<PlayerView> {
    match expect_ok(replayer.apply(&Step::State { session: 0, player }).await)? {
        Response::State(view) => Ok(*view),
        other => Err(anyhow!("unexpected response: {:?}", other)),
    }
}

/// Cells of the opponent board the viewer has not fired at.
fn open_targets(view: &PlayerView) -> Vec<Coord> {
    view.opponent_board
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cell::Empty)
                .map(move |(c, _)| (r, c))
        })
        .collect()
}

/// Play a full game. The store is seeded with `seed`, shot selection with
/// `seed + 1`, so the same inputs always produce the same game.
pub async fn simulate(seed: u64, config: GameConfig) -> anyhow::Result<SimReport> {
    let store = SessionStore::with_seed(config.clone(), seed)?;
    let mut replayer = Replayer::new(store);
    let mut log = ReplayLog::new(seed, config.clone());
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let setup = [
        Step::Create,
        Step::Join { session: 0 },
        Step::Randomize {
            session: 0,
            player: PlayerId::One,
        },
        Step::Randomize {
            session: 0,
            player: PlayerId::Two,
        },
    ];
    for step in setup {
        expect_ok(replayer.apply(&step).await)?;
        log.push(step);
    }

    let max_moves = config
        .board_size
        .saturating_mul(config.board_size)
        .saturating_mul(2);
    let mut player = config.first_player;
    for _ in 0..max_moves {
        let targets = open_targets(&view(&mut replayer, player).await?);
        let &(row, col) = targets
            .choose(&mut rng)
            .ok_or_else(|| anyhow!("{:?} has no cells left to fire at", player))?;
        let step = Step::Move {
            session: 0,
            player,
            row,
            col,
        };
        let outcome = match expect_ok(replayer.apply(&step).await)? {
            Response::Move(outcome) => outcome,
            other => return Err(anyhow!("unexpected response: {:?}", other)),
        };
        log.push(step);
        debug!("{:?} fired at ({}, {}): {:?}", player, row, col, outcome.outcome);
        if outcome.game_over {
            break;
        }
        if outcome.switch_turn {
            player = player.opponent();
        }
    }

    let one = view(&mut replayer, PlayerId::One).await?;
    let two = view(&mut replayer, PlayerId::Two).await?;
    if one.winner.is_none() {
        return Err(anyhow!("game did not finish within {} moves", max_moves));
    }
    info!(
        "simulation finished: {:?} won after {} shots",
        one.winner,
        one.shots_fired + two.shots_fired
    );
    Ok(SimReport {
        winner: one.winner,
        shots: [one.shots_fired, two.shots_fired],
        hits: [one.hits, two.hits],
        log,
    })
}
