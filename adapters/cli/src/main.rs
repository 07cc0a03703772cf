#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless ASCIILVANIA session.

mod autoplay;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use asciilvania_core::Rules;
use asciilvania_world::{query, Board};
use clap::Parser;
use log::info;

use crate::autoplay::TurnOutcome;

/// Plays a seeded session with a scripted player and prints one status line
/// per turn.
#[derive(Debug, Parser)]
#[command(name = "asciilvania", version)]
struct Args {
    /// Number of grid columns.
    #[arg(long, default_value_t = 12)]
    width: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = 8)]
    height: u32,
    /// Seed for the board's random source; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of turns to play.
    #[arg(long, default_value_t = 20)]
    turns: u32,
    /// JSON file overriding the default rules.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

/// Entry point for the ASCIILVANIA command-line interface.
fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();

    let args = Args::parse();
    let rules = load_rules(args.rules.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed: {seed}");

    let mut board = Board::seeded(args.width, args.height, rules, seed)
        .context("failed to build the board")?;
    let player = board
        .rules()
        .player
        .instantiate()
        .context("player template is invalid")?;
    board
        .spawn_player_centered(player)
        .context("failed to place the player")?;
    board.reset();

    for _ in 0..args.turns {
        let outcome = autoplay::play_turn(&mut board);
        print_status(&board);
        if outcome == TurnOutcome::GameOver {
            break;
        }
    }

    let status = query::status(&board);
    println!(
        "final: {} after {} turns with score {}",
        if board.is_game_over() { "defeated" } else { "standing" },
        status.turn,
        status.score
    );
    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules from {}", path.display()))?;
    let rules: Rules = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse rules in {}", path.display()))?;
    rules
        .validate()
        .with_context(|| format!("invalid rules in {}", path.display()))?;
    Ok(rules)
}

fn print_status<R>(board: &Board<R>) {
    let status = query::status(board);
    let hp = status
        .player_hp
        .map_or_else(|| "-".to_owned(), |hp| hp.to_string());
    println!(
        "turn {:>3} | score {:>4} | hp {:>3} | enemies {:>2} | {:?}",
        status.turn, status.score, hp, status.enemy_count, status.phase
    );
}
