//! Game settings and board configuration records.
//!
//! Board data arrives as a list of `LocationRecord`s, one per space, each
//! tagged with its `kind`. Every kind declares exactly the fields it needs so
//! a missing field fails deserialization instead of surfacing mid-game.

use crate::board::{Color, DeckKind, LocationId};
use serde::{Deserialize, Serialize};

/// Money every player starts with
pub const STARTING_BALANCE: i64 = 1500;

/// Paid when passing or landing on Go
pub const SALARY: i64 = 200;

/// Fine for leaving jail without a card or doubles
pub const JAIL_FINE: i64 = 50;

/// Failed doubles attempts before the fine is forced
pub const MAX_JAIL_ATTEMPTS: u8 = 3;

/// Tunable rules for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balance each player starts with
    pub starting_balance: i64,
    /// Salary for passing Go
    pub salary: i64,
    /// Fine to leave jail
    pub jail_fine: i64,
    /// Doubles attempts allowed before the fine is forced
    pub max_jail_attempts: u8,
    /// Whether players develop their colorgroups at the start of each turn
    pub auto_develop: bool,
    /// Seed for the dice, for deterministic replays
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            salary: SALARY,
            jail_fine: JAIL_FINE,
            max_jail_attempts: MAX_JAIL_ATTEMPTS,
            auto_develop: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default rules with seeded dice
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// One board space as it appears in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub index: LocationId,
    pub name: String,
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// Kind-specific fields of a board space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordKind {
    /// Go, Just Visiting
    Plain,
    /// Flat payment to the bank
    Tax { amount: u32 },
    Railway { cost: u32, mortgage_value: u32 },
    Utility { cost: u32, mortgage_value: u32 },
    /// Landing here sends the player to jail
    Jail,
    FreeParking,
    Card { deck: DeckKind },
    Street {
        color: Color,
        cost: u32,
        mortgage_value: u32,
        house_cost: u32,
        base_rent: u32,
        house_rents: [u32; 4],
        hotel_rent: u32,
    },
}
