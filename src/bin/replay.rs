use std::error::Error;
use std::path::PathBuf;

use checkers::config::GameConfig;
use checkers::engine::{Engine, EngineState, Interaction};
use checkers::moves::parse_turn;
use clap::Parser;
use log::{info, warn};

/// Replay a checkers game written in square-number notation.
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"), about, long_about = None)]
struct Args {
    /// JSON game config (initial_rows, first_player)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print the final position
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,

    /// Turns such as `22-18`, `11x18` or `22x15x6`
    #[arg(required = true)]
    turns: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::new(),
    };
    // Nothing is animated here, so moves settle immediately.
    config.await_transitions = false;
    let mut engine = Engine::new(config)?;

    for (n, turn) in args.turns.iter().enumerate() {
        let hops = parse_turn(turn).inspect_err(|e| warn!("turn {}: {e}", n + 1))?;
        let mover = engine.game_state().current_player;
        for (from, to) in hops {
            engine.attempt_interaction(Interaction::Piece { row: from.0 as i32, col: from.1 as i32 })?;
            engine.attempt_interaction(Interaction::Cell { row: to.0 as i32, col: to.1 as i32 })?;
        }
        if let EngineState::ChainCapture { .. } = engine.state() {
            return Err(format!("turn {} ({turn}): {mover} still has a capture to make", n + 1).into());
        }
        if !args.quiet {
            println!("{}. {mover} {turn}\n{}", n + 1, engine.board());
        }
        if let EngineState::GameOver { winner } = engine.state() {
            info!("game ended on turn {}", n + 1);
            println!("{winner} wins");
            return Ok(());
        }
    }

    if args.quiet {
        println!("{}", engine.board());
    }
    if !engine.has_legal_move() {
        println!("{} has no legal move", engine.game_state().current_player);
    } else {
        println!("{} to move", engine.game_state().current_player);
    }
    Ok(())
}
