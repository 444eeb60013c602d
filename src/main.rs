//! Crossline - terminal front end
//!
//! Interactive play, AI self-play and single-position analysis.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use crossline::{
    AiPlayer, Board, ConfigOverrides, GameConfig, GameOutcome, HumanPlayer, OpponentKind, Player,
    Session, Side, is_winning_position, legal_moves, render, search,
};
use std::io::Write;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();
    let env = ConfigOverrides::from_env()?;
    let config = GameConfig::resolve(
        cli.command.config_path().map(|p| p.as_path()),
        &env,
        &cli.command.overrides(),
    )?;

    match cli.command {
        Command::Play { layout, .. } => run_play(&config, layout.as_deref()),
        Command::Selfplay { games, .. } => run_selfplay(&config, games),
        Command::Analyze {
            layout, to_move, ..
        } => run_analyze(&config, &layout, to_move),
    }
}

/// Human against the AI, or two humans sharing the terminal.
#[instrument(skip(config))]
fn run_play(config: &GameConfig, layout: Option<&str>) -> Result<()> {
    let layout = parse_layout(layout)?;

    let (black, white) = match config.opponent() {
        OpponentKind::Human => seats(HumanPlayer::new("Black"), HumanPlayer::new("White")),
        OpponentKind::Ai => {
            let ai: Box<dyn Player> = Box::new(AiPlayer::new("Computer", *config.search_depth()));
            let human: Box<dyn Player> = Box::new(HumanPlayer::new("You"));
            match config.ai_color() {
                Side::Black => (ai, human),
                Side::White => (human, ai),
            }
        }
    };

    println!("Crossline: slide three pieces onto a line through the center.");
    println!("Enter moves as `from to` using cell numbers (e.g. `2 5`), or `moves`, `new`, `quit`.");

    let stdin = std::io::stdin();
    let mut session = Session::new(black, white, layout, config, stdin.lock(), std::io::stdout());
    let summaries = session.run(None)?;
    info!(games = summaries.len(), score = %session.score(), "Session ended");

    println!("\nMoves of the last game:");
    println!("{}", render::history(session.state().history()));
    Ok(())
}

/// Two AIs playing a fixed number of games.
#[instrument(skip(config))]
fn run_selfplay(config: &GameConfig, games: usize) -> Result<()> {
    let depth = *config.search_depth();
    let mut session = Session::new(
        Box::new(AiPlayer::new("Black AI", depth)),
        Box::new(AiPlayer::new("White AI", depth)),
        None,
        config,
        std::io::empty(),
        std::io::sink(),
    );
    let summaries = session.run(Some(games))?;

    let mut out = std::io::stdout().lock();
    let mut abandoned = 0;
    for (i, summary) in summaries.iter().enumerate() {
        writeln!(out, "Game {:>3}: {} after {} moves", i + 1, summary.outcome, summary.plies)?;
        if summary.outcome == GameOutcome::Abandoned {
            abandoned += 1;
        }
    }
    writeln!(out, "{} ({} abandoned)", render::score(&session.score()), abandoned)?;
    Ok(())
}

/// Prints the legal moves and the AI's pick for one layout.
#[instrument(skip(config))]
fn run_analyze(config: &GameConfig, layout: &str, to_move: Side) -> Result<()> {
    let board: Board = layout
        .parse()
        .with_context(|| format!("Invalid layout {:?}", layout))?;
    println!("{}\n", board.display());
    if let Some(winner) = [Side::Black, Side::White]
        .into_iter()
        .find(|&side| is_winning_position(&board, side))
    {
        println!("{} has already won.", winner);
        return Ok(());
    }

    println!("{} to move", to_move);
    println!("{}", render::legal_moves(&legal_moves(&board, to_move)));

    let outcome = search(&board, to_move, to_move.opponent(), *config.search_depth());
    match outcome.best_move {
        Some(action) => println!(
            "Best move: {} → {} (score {}, {} nodes, depth {})",
            action.from.number(),
            action.to.number(),
            outcome.score,
            outcome.nodes,
            config.search_depth()
        ),
        None => println!("{} cannot move and loses by blockade.", to_move),
    }
    Ok(())
}

fn seats(
    black: impl Player + 'static,
    white: impl Player + 'static,
) -> (Box<dyn Player>, Box<dyn Player>) {
    (Box::new(black), Box::new(white))
}

fn parse_layout(layout: Option<&str>) -> Result<Option<Board>> {
    layout
        .map(|s| s.parse::<Board>().with_context(|| format!("Invalid layout {:?}", s)))
        .transpose()
}

/// Installs the tracing subscriber. Logs go to stderr; stdout is the game.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crossline=debug,strictly_crossline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
