//! Game configuration: TOML file, environment, then command line.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_crossline::Player;
use tracing::{debug, info, instrument};

/// Environment variable overriding `search_depth`.
pub const ENV_SEARCH_DEPTH: &str = "CROSSLINE_SEARCH_DEPTH";
/// Environment variable overriding `max_plies`.
pub const ENV_MAX_PLIES: &str = "CROSSLINE_MAX_PLIES";
/// Environment variable overriding `seed`.
pub const ENV_SEED: &str = "CROSSLINE_SEED";

/// Deepest search the host accepts.
pub const MAX_SEARCH_DEPTH: u8 = 8;

/// Who sits in the second seat of an interactive game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Another person at the same terminal.
    #[display("human")]
    Human,
    /// The minimax agent.
    #[display("ai")]
    Ai,
}

/// Settings for a crossline session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Plies searched by the AI.
    #[serde(default = "default_search_depth")]
    search_depth: u8,

    /// Opponent in interactive play.
    #[serde(default = "default_opponent")]
    opponent: OpponentKind,

    /// Color the AI plays.
    #[serde(default = "default_ai_color")]
    ai_color: Player,

    /// Plies after which a game is abandoned without a winner.
    #[serde(default = "default_max_plies")]
    max_plies: u32,

    /// Seed for layout generation.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_search_depth() -> u8 {
    2
}

fn default_opponent() -> OpponentKind {
    OpponentKind::Ai
}

fn default_ai_color() -> Player {
    Player::White
}

fn default_max_plies() -> u32 {
    200
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            search_depth: default_search_depth(),
            opponent: default_opponent(),
            ai_color: default_ai_color(),
            max_plies: default_max_plies(),
            seed: None,
        }
    }
}

/// Optional values layered over a [`GameConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replaces `search_depth`.
    pub search_depth: Option<u8>,
    /// Replaces `opponent`.
    pub opponent: Option<OpponentKind>,
    /// Replaces `ai_color`.
    pub ai_color: Option<Player>,
    /// Replaces `max_plies`.
    pub max_plies: Option<u32>,
    /// Replaces `seed`.
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its
    /// value.
    #[instrument(skip(lookup))]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let overrides = Self {
            search_depth: parse_var(&lookup, ENV_SEARCH_DEPTH)?,
            max_plies: parse_var(&lookup, ENV_MAX_PLIES)?,
            seed: parse_var(&lookup, ENV_SEED)?,
            ..Self::default()
        };
        debug!(?overrides, "Environment overrides");
        Ok(overrides)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::new(format!("Invalid {}={:?}: {}", key, raw, e))),
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            search_depth = config.search_depth,
            opponent = %config.opponent,
            ai_color = %config.ai_color,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Builds the effective configuration: file (or defaults), then the
    /// environment, then `cli`.
    #[instrument(skip(path, env, cli))]
    pub fn resolve(
        path: Option<&Path>,
        env: &ConfigOverrides,
        cli: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(env);
        config.apply(cli);
        config.validate()?;
        debug!(?config, "Resolved config");
        Ok(config)
    }

    /// Replaces every field `overrides` sets.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(depth) = overrides.search_depth {
            self.search_depth = depth;
        }
        if let Some(opponent) = overrides.opponent {
            self.opponent = opponent;
        }
        if let Some(color) = overrides.ai_color {
            self.ai_color = color;
        }
        if let Some(plies) = overrides.max_plies {
            self.max_plies = plies;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(ConfigError::new(format!(
                "search_depth must be between 1 and {}, got {}",
                MAX_SEARCH_DEPTH, self.search_depth
            )));
        }
        if self.max_plies == 0 {
            return Err(ConfigError::new("max_plies must be positive".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
