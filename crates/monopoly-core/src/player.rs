//! Player state.
//!
//! This module contains:
//! - Player struct with balance, position, jail state and holdings
//! - Roll history for the three-doubles rule
//! - The simple purchase and development strategies

use crate::board::{LocationId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rolls kept for the three-doubles rule
const ROLL_HISTORY: usize = 3;

/// How a player orders colorgroup development
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Develop the most expensive colorgroups first
    Greedy,
    /// Develop colorgroups in random order
    Random,
}

/// Where a player stands in the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Active,
    InJail,
    /// Could not resolve bankruptcy
    Eliminated,
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position in turn order
    pub id: PlayerId,
    /// Unique display name
    pub name: String,
    /// Cash; negative only while bankruptcy is being resolved
    pub balance: i64,
    /// Current board position
    pub position: LocationId,
    pub in_jail: bool,
    /// Failed attempts to roll doubles in jail
    pub jail_attempts: u8,
    pub has_get_out_of_jail_free: bool,
    /// Owned locations
    pub properties: BTreeSet<LocationId>,
    /// Latest rolls since the last trip to jail, at most three
    pub rolls: Vec<(u8, u8)>,
    pub eliminated: bool,
    /// Buy every affordable unowned location landed on
    pub auto_purchase: bool,
    pub strategy: Strategy,
}

impl Player {
    /// Create a new player at Go
    pub fn new(id: PlayerId, name: String, balance: i64) -> Self {
        Self {
            id,
            name,
            balance,
            position: 0,
            in_jail: false,
            jail_attempts: 0,
            has_get_out_of_jail_free: false,
            properties: BTreeSet::new(),
            rolls: Vec::new(),
            eliminated: false,
            auto_purchase: true,
            strategy: Strategy::Greedy,
        }
    }

    pub fn state(&self) -> PlayerState {
        if self.eliminated {
            PlayerState::Eliminated
        } else if self.in_jail {
            PlayerState::InJail
        } else {
            PlayerState::Active
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        self.balance < 0
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.balance >= amount as i64
    }

    pub fn credit(&mut self, amount: u32) {
        self.balance += amount as i64;
    }

    pub fn debit(&mut self, amount: u32) {
        self.balance -= amount as i64;
    }

    /// Record a roll; true if it completes three doubles in a row
    pub fn record_roll(&mut self, roll: (u8, u8)) -> bool {
        self.rolls.push(roll);
        if self.rolls.len() > ROLL_HISTORY {
            self.rolls.remove(0);
        }
        self.rolls.len() == ROLL_HISTORY && self.rolls.iter().all(|(a, b)| a == b)
    }

    /// Put the player in jail
    pub fn send_to_jail(&mut self, jail: LocationId) {
        self.position = jail;
        self.in_jail = true;
        self.jail_attempts = 0;
        self.rolls.clear();
    }

    pub fn release_from_jail(&mut self) {
        self.in_jail = false;
        self.jail_attempts = 0;
    }
}
