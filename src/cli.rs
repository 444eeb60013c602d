//! Command-line interface for crossline.

use clap::{Parser, Subcommand};
use crossline::{ConfigOverrides, OpponentKind};
use std::path::PathBuf;
use strictly_crossline::Player;

/// Crossline - slide three pieces onto a line through the center
#[derive(Parser, Debug)]
#[command(name = "crossline")]
#[command(about = "Play crossline against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on this terminal
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Search depth in plies (1-8)
        #[arg(short, long)]
        depth: Option<u8>,

        /// Who takes the second seat
        #[arg(long, value_enum)]
        opponent: Option<OpponentKind>,

        /// Color the computer plays (black or white)
        #[arg(long)]
        ai_color: Option<Player>,

        /// Seed for layout generation
        #[arg(long)]
        seed: Option<u64>,

        /// Starting layout, e.g. `BBBW.W.W.`
        #[arg(long)]
        layout: Option<String>,
    },

    /// Let two computer players play each other
    Selfplay {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Search depth in plies (1-8)
        #[arg(short, long)]
        depth: Option<u8>,

        /// Seed for layout generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the legal moves and the computer's choice for a layout
    Analyze {
        /// Layout, e.g. `BBBW.W.W.`
        layout: String,

        /// Side to move (black or white)
        #[arg(long, default_value = "black")]
        to_move: Player,

        /// Search depth in plies (1-8)
        #[arg(short, long)]
        depth: Option<u8>,
    },
}

impl Command {
    /// Overrides this command puts on top of the file and environment.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Play {
                depth,
                opponent,
                ai_color,
                seed,
                ..
            } => ConfigOverrides {
                search_depth: *depth,
                opponent: *opponent,
                ai_color: *ai_color,
                seed: *seed,
                ..Default::default()
            },
            Command::Selfplay { depth, seed, .. } => ConfigOverrides {
                search_depth: *depth,
                seed: *seed,
                ..Default::default()
            },
            Command::Analyze { depth, .. } => ConfigOverrides {
                search_depth: *depth,
                ..Default::default()
            },
        }
    }

    /// Config file named on the command line, if any.
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Play { config, .. } => config.as_ref(),
            _ => None,
        }
    }
}
