//! Events emitted as a game is played.
//!
//! Every state change produces a `GameEvent`. Events are narration only: the
//! engine logs each one through `tracing` as it happens and keeps them in the
//! game's journal, but never branches on them.

use crate::board::{Color, DeckKind, LocationId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

/// How a player got out of jail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailRelease {
    /// Used a get-out-of-jail-free card
    Card,
    /// Paid the fine voluntarily
    Fine,
    /// Rolled doubles
    Doubles,
    /// Paid the fine after running out of attempts
    ForcedFine,
}

/// Events that occur as a game is played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Opening roll to decide who starts
    StarterRoll { player: String, total: u8 },

    /// A player won the opening roll
    StarterChosen { player: String },

    /// A turn began
    TurnStarted { player: String, turn: u32 },

    /// Dice were rolled
    DiceRolled {
        player: String,
        roll: (u8, u8),
        total: u8,
    },

    /// Third doubles in a row
    ThreeDoubles { player: String },

    /// A player changed position
    Moved {
        player: String,
        to: LocationId,
        location: String,
    },

    /// Passed or landed on Go
    SalaryCollected { player: String, amount: i64 },

    /// Bought a location from the bank
    Purchased {
        player: String,
        location: String,
        cost: u32,
    },

    /// A player now holds every street of a colorgroup
    ColorgroupCompleted { player: String, color: Color },

    /// Rent paid to another player
    RentPaid {
        player: String,
        owner: String,
        location: String,
        amount: u32,
    },

    /// Tax paid to the bank
    TaxPaid {
        player: String,
        location: String,
        amount: u32,
    },

    /// A card was drawn
    CardDrawn {
        player: String,
        deck: DeckKind,
        text: String,
    },

    /// A card paid the player
    CardCollected { player: String, amount: u32 },

    /// A card charged the player
    CardPaid { player: String, amount: u32 },

    /// Another player paid the drawer of a card
    PlayerPaid {
        from: String,
        to: String,
        amount: u32,
    },

    /// A get-out-of-jail-free card was picked up
    GetOutOfJailFreeReceived { player: String },

    /// Sent to jail
    WentToJail { player: String },

    /// Failed a doubles attempt in jail
    StayedInJail {
        player: String,
        roll: (u8, u8),
        attempt: u8,
    },

    /// Left jail
    LeftJail {
        player: String,
        release: JailRelease,
        paid: i64,
    },

    /// A location was mortgaged
    Mortgaged {
        player: String,
        location: String,
        amount: u32,
    },

    /// A mortgage was lifted
    Unmortgaged {
        player: String,
        location: String,
        amount: u32,
    },

    /// A house was built
    HouseBuilt {
        player: String,
        location: String,
        houses: u8,
    },

    /// A hotel was built
    HotelBuilt { player: String, location: String },

    /// A house or hotel went back to the bank
    StructureSold {
        player: String,
        location: String,
        refund: u32,
    },

    /// A location went back to the bank
    PropertySold {
        player: String,
        location: String,
        refund: u32,
    },

    /// A balance went negative
    BankruptcyStarted { player: String, balance: i64 },

    /// Liquidation brought the balance back to zero or above
    BankruptcyResolved { player: String, balance: i64 },

    /// Liquidation ran out of assets
    PlayerEliminated { player: String, balance: i64 },
}

impl GameEvent {
    /// Log this event at the severity it deserves
    pub fn log(&self) {
        match self {
            GameEvent::WentToJail { .. }
            | GameEvent::ThreeDoubles { .. }
            | GameEvent::ColorgroupCompleted { .. }
            | GameEvent::BankruptcyStarted { .. }
            | GameEvent::PlayerEliminated { .. } => error!("{}", self),

            GameEvent::Purchased { .. }
            | GameEvent::RentPaid { .. }
            | GameEvent::TaxPaid { .. }
            | GameEvent::CardDrawn { .. }
            | GameEvent::CardCollected { .. }
            | GameEvent::CardPaid { .. }
            | GameEvent::PlayerPaid { .. }
            | GameEvent::GetOutOfJailFreeReceived { .. }
            | GameEvent::LeftJail { .. }
            | GameEvent::Mortgaged { .. }
            | GameEvent::Unmortgaged { .. }
            | GameEvent::HouseBuilt { .. }
            | GameEvent::HotelBuilt { .. }
            | GameEvent::StructureSold { .. }
            | GameEvent::PropertySold { .. }
            | GameEvent::BankruptcyResolved { .. }
            | GameEvent::StarterChosen { .. } => warn!("{}", self),

            _ => info!("{}", self),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::StarterRoll { player, total } => {
                write!(f, "{} rolled {} for the opening roll", player, total)
            }
            GameEvent::StarterChosen { player } => write!(f, "{} starts the game", player),
            GameEvent::TurnStarted { player, turn } => {
                write!(f, "Turn {} starts: {} to play", turn, player)
            }
            GameEvent::DiceRolled {
                player,
                roll: (a, b),
                total,
            } => write!(f, "{} rolled {} + {} = {}", player, a, b, total),
            GameEvent::ThreeDoubles { player } => write!(f, "{} rolled doubles thrice", player),
            GameEvent::Moved {
                player, location, ..
            } => write!(f, "{} moved to {}", player, location),
            GameEvent::SalaryCollected { player, amount } => {
                write!(f, "{} collected ${} salary", player, amount)
            }
            GameEvent::Purchased {
                player,
                location,
                cost,
            } => write!(f, "{} purchased {} for ${}", player, location, cost),
            GameEvent::ColorgroupCompleted { player, color } => {
                write!(f, "{} owns the {} group", player, color.name())
            }
            GameEvent::RentPaid {
                player,
                owner,
                location,
                amount,
            } => write!(
                f,
                "{} paid ${} for {} to {}",
                player, amount, location, owner
            ),
            GameEvent::TaxPaid {
                player,
                location,
                amount,
            } => write!(f, "{} paid ${} for {}", player, amount, location),
            GameEvent::CardDrawn { player, deck, text } => {
                write!(f, "{} drew a {} card: {}", player, deck.name(), text)
            }
            GameEvent::CardCollected { player, amount } => {
                write!(f, "{} collected ${}", player, amount)
            }
            GameEvent::CardPaid { player, amount } => write!(f, "{} paid ${}", player, amount),
            GameEvent::PlayerPaid { from, to, amount } => {
                write!(f, "{} paid ${} to {}", from, amount, to)
            }
            GameEvent::GetOutOfJailFreeReceived { player } => {
                write!(f, "{} gets a get out of jail free card", player)
            }
            GameEvent::WentToJail { player } => write!(f, "{} went to jail", player),
            GameEvent::StayedInJail {
                player,
                roll: (a, b),
                attempt,
            } => write!(
                f,
                "{} rolled {} + {} in jail (attempt {}) and stays",
                player, a, b, attempt
            ),
            GameEvent::LeftJail {
                player,
                release,
                paid,
            } => match release {
                JailRelease::Card => write!(f, "{} used a get out of jail free card", player),
                JailRelease::Fine => write!(f, "{} paid a ${} fine to leave jail", player, paid),
                JailRelease::Doubles => write!(f, "{} rolled doubles and left jail", player),
                JailRelease::ForcedFine => write!(
                    f,
                    "{} failed to leave jail for three turns and paid ${}",
                    player, paid
                ),
            },
            GameEvent::Mortgaged {
                player,
                location,
                amount,
            } => write!(f, "{} mortgaged {} for ${}", player, location, amount),
            GameEvent::Unmortgaged {
                player,
                location,
                amount,
            } => write!(f, "{} unmortgaged {} for ${}", player, location, amount),
            GameEvent::HouseBuilt {
                player,
                location,
                houses,
            } => write!(
                f,
                "{} built a house on {} ({} total)",
                player, location, houses
            ),
            GameEvent::HotelBuilt { player, location } => {
                write!(f, "{} built a hotel on {}", player, location)
            }
            GameEvent::StructureSold {
                player,
                location,
                refund,
            } => write!(
                f,
                "{} sold a structure on {} for ${}",
                player, location, refund
            ),
            GameEvent::PropertySold {
                player,
                location,
                refund,
            } => write!(f, "{} sold {} to the bank for ${}", player, location, refund),
            GameEvent::BankruptcyStarted { player, balance } => {
                write!(f, "{} is bankrupt with a balance of ${}", player, balance)
            }
            GameEvent::BankruptcyResolved { player, balance } => write!(
                f,
                "{} resolved bankruptcy with ${} left",
                player, balance
            ),
            GameEvent::PlayerEliminated { player, balance } => write!(
                f,
                "{} is still bankrupt at ${} and loses",
                player, balance
            ),
        }
    }
}
