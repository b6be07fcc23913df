//! Monopoly - turn-resolution and economic-state engine
//!
//! This crate provides the core game logic for a Monopoly-style board game, including:
//! - The 40-space board with streets, railways, utilities, taxes and card spaces
//! - Chance and Community Chest decks with rotate-on-draw behavior
//! - Property ownership, mortgages and colorgroup development rules
//! - Player movement, jail handling and bankruptcy resolution
//! - A turn-by-turn game orchestrator
//!
//! # Architecture
//!
//! The engine is single-threaded and synchronous. A `Game` owns the board, the
//! decks, the dice and every player; hosts drive it one turn at a time and
//! observe it through `GameEvent`s and read-only queries.
//!
//! # Modules
//!
//! - [`board`]: Locations, colorgroups and board loading
//! - [`property`]: Rent, mortgages and development
//! - [`cards`]: Chance and Community Chest decks
//! - [`dice`]: Seedable dice and coin flips
//! - [`player`]: Player state
//! - [`bankruptcy`]: Liquidation order when a balance goes negative
//! - [`game`]: Turn engine and orchestrator
//! - [`events`]: Narration events emitted by the engine
//! - [`config`]: Game settings and board records

pub mod bankruptcy;
pub mod board;
pub mod cards;
pub mod config;
pub mod dice;
pub mod events;
pub mod game;
pub mod player;
pub mod property;

// Re-export commonly used types
pub use bankruptcy::BankruptcyOutcome;
pub use board::{Board, Color, DeckKind, Location, LocationId, LocationKind, PlayerId, Street};
pub use cards::{Card, CardEffect, ChanceCard, CommunityChestCard, Deck};
pub use config::{GameConfig, LocationRecord, RecordKind};
pub use dice::Dice;
pub use events::{GameEvent, JailRelease};
pub use game::{Asset, Game, GameError, GamePhase, GameSnapshot, PlayerSnapshot};
pub use player::{Player, PlayerState, Strategy};
