mod match_runner;

use clap::{Parser, ValueEnum};
use std::time::Duration;
use uttt_engine::config::{ConfigManager, EngineConfig};
use uttt_engine::{log, logger};

use match_runner::{MatchSummary, Players, run_matches};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Heuristic search on the session's background AI worker.
    Heuristic,
    /// Uniformly random legal moves, chosen on the control loop.
    Random,
}

#[derive(Parser)]
#[command(name = "uttt", about = "Headless ultimate tic-tac-toe matches")]
struct Args {
    #[arg(long, default_value = "uttt.yaml")]
    config: String,

    #[arg(long, default_value_t = 1)]
    games: u32,

    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    player_one: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Heuristic)]
    player_two: PlayerKind,

    /// Control loop tick; 16 ms matches a 60 FPS frontend.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("uttt".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = ConfigManager::<_, EngineConfig>::from_yaml_file(&args.config).get_config()?;
    log!(
        "Loaded config: {:?} bot, ply limit {}, weighting ply limit {}",
        config.ai.bot_type, config.ai.ply_limit, config.ai.weighting_ply_limit
    );

    let players = Players {
        player_one: args.player_one,
        player_two: args.player_two,
    };
    let tick = Duration::from_millis(args.tick_ms.max(1));
    let mut summary = MatchSummary::default();

    tokio::select! {
        result = run_matches(&config, players, args.games, tick, &mut summary) => result?,
        _ = tokio::signal::ctrl_c() => {
            log!("Interrupted, stopping early");
        }
    }

    log!("{}", summary);
    Ok(())
}
