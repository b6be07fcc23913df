//! Simulation settings read from the environment.

use anyhow::Context;
use monopoly_core::{Board, GameConfig};
use std::path::PathBuf;

/// Players seated when `MONOPOLY_PLAYERS` is unset
const DEFAULT_PLAYERS: &str = "Alice,Bob";

/// Turn cap when `MONOPOLY_MAX_TURNS` is unset
const DEFAULT_MAX_TURNS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub players: Vec<String>,
    pub max_turns: u32,
    pub seed: Option<u64>,
    /// Alternate board document
    pub board_path: Option<PathBuf>,
}

impl SimConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let players: Vec<String> = lookup("MONOPOLY_PLAYERS")
            .unwrap_or_else(|| DEFAULT_PLAYERS.into())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        let max_turns = match lookup("MONOPOLY_MAX_TURNS") {
            Some(value) => value
                .parse::<u32>()
                .with_context(|| format!("MONOPOLY_MAX_TURNS is not a number: {}", value))?,
            None => DEFAULT_MAX_TURNS,
        };

        let seed = lookup("MONOPOLY_SEED")
            .map(|value| {
                value
                    .parse::<u64>()
                    .with_context(|| format!("MONOPOLY_SEED is not a number: {}", value))
            })
            .transpose()?;

        Ok(Self {
            players,
            max_turns,
            seed,
            board_path: lookup("MONOPOLY_BOARD").map(PathBuf::from),
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            ..GameConfig::default()
        }
    }

    /// The standard board, or the one at `board_path`
    pub fn load_board(&self) -> anyhow::Result<Board> {
        match &self.board_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading board from {}", path.display()))?;
                Ok(Board::from_json(&json)?)
            }
            None => Ok(Board::standard()?),
        }
    }
}
