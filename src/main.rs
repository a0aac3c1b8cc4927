use std::fs;
use std::path::PathBuf;

use battleship_rules::{init_logging, simulate, GameConfig, PlayerId, ReplayLog, TurnRule};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
    Bincode,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a complete random game between two automated players.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = battleship_rules::BOARD_SIZE)]
        board_size: usize,
        #[arg(long, help = "A hit earns another shot")]
        keep_turn_on_hit: bool,
        #[arg(long, help = "Write the replay log to this file")]
        record: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = LogFormat::Bincode)]
        format: LogFormat,
    },
    /// Re-execute a recorded replay log and print every response.
    Replay {
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = LogFormat::Bincode)]
        format: LogFormat,
    },
}

fn player_name(player: Option<PlayerId>) -> Option<&'static str> {
    player.map(|p| match p {
        PlayerId::One => "player1",
        PlayerId::Two => "player2",
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            seed,
            board_size,
            keep_turn_on_hit,
            record,
            format,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let config = GameConfig {
                board_size,
                turn_rule: if keep_turn_on_hit {
                    TurnRule::KeepOnHit
                } else {
                    TurnRule::Alternate
                },
                ..GameConfig::default()
            };
            let report = simulate(seed, config).await?;

            if let Some(path) = record {
                match format {
                    LogFormat::Bincode => fs::write(&path, report.log.to_bincode()?)?,
                    LogFormat::Json => fs::write(&path, report.log.to_json()?)?,
                }
                log::info!("replay log written to {}", path.display());
            }

            let summary = json!({
                "seed": seed,
                "winner": player_name(report.winner),
                "player1": {"shots": report.shots[0], "hits": report.hits[0]},
                "player2": {"shots": report.shots[1], "hits": report.hits[1]},
                "steps": report.log.steps.len(),
            });
            println!("{}", serde_json::to_string(&summary)?);
        }
        Commands::Replay { path, format } => {
            let log = match format {
                LogFormat::Bincode => ReplayLog::from_bincode(&fs::read(&path)?)?,
                LogFormat::Json => ReplayLog::from_json(&fs::read_to_string(&path)?)?,
            };
            for response in log.run().await? {
                println!("{}", serde_json::to_string(&response)?);
            }
        }
    }
    Ok(())
}
