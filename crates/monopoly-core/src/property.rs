//! Rent, ownership and development rules.
//!
//! These are the board-level rules. They validate and mutate location state
//! and report the money involved; moving that money between players is the
//! game's job.

use crate::board::{Board, Color, LocationId, LocationKind, PlayerId};
use crate::dice::Dice;
use crate::game::GameError;
use serde::{Deserialize, Serialize};

/// Railway rent by number of railways held
pub const RAILWAY_RENTS: [u32; 4] = [25, 50, 100, 200];

/// Utility rent multiplier with one utility held
pub const SINGLE_UTILITY_MULTIPLIER: u32 = 4;

/// Utility rent multiplier with both utilities held
pub const BOTH_UTILITIES_MULTIPLIER: u32 = 10;

/// Interest on lifting a mortgage, in percent
pub const UNMORTGAGE_INTEREST: u32 = 10;

/// Result of building on a street
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Structure {
    /// A house; carries the new house count
    House(u8),
    Hotel,
}

impl Board {
    /// Rent owed for landing on a location.
    ///
    /// Utility rent rolls fresh dice. Railways and utilities must be owned
    /// when queried; anything else is a bug in the caller.
    pub fn rent(&self, index: LocationId, dice: &mut Dice) -> Result<u32, GameError> {
        let location = self.location(index)?;
        if location.mortgaged {
            return Ok(0);
        }

        match &location.kind {
            LocationKind::Plain
            | LocationKind::Jail
            | LocationKind::FreeParking
            | LocationKind::Card(_) => Ok(0),

            LocationKind::Tax { amount } => Ok(*amount),

            LocationKind::Street(street) => {
                let Some(owner) = location.owner else {
                    return Ok(0);
                };
                if street.hotel {
                    Ok(street.hotel_rent)
                } else if street.houses > 0 {
                    Ok(street.house_rents[street.houses as usize - 1])
                } else if self.owns_colorgroup(owner, street.color) {
                    Ok(street.base_rent * 2)
                } else {
                    Ok(street.base_rent)
                }
            }

            LocationKind::Railway => {
                let owner = location.owner.ok_or_else(|| {
                    GameError::InvariantViolation(format!("rent queried on unowned {}", location.name))
                })?;
                let held = self.railways_owned(owner);
                held.checked_sub(1)
                    .and_then(|i| RAILWAY_RENTS.get(i))
                    .copied()
                    .ok_or_else(|| {
                        GameError::InvariantViolation(format!("owner holds {} railways", held))
                    })
            }

            LocationKind::Utility => {
                let owner = location.owner.ok_or_else(|| {
                    GameError::InvariantViolation(format!("rent queried on unowned {}", location.name))
                })?;
                match self.utilities_owned(owner) {
                    1 => Ok(SINGLE_UTILITY_MULTIPLIER * dice.roll_total()),
                    2 => Ok(BOTH_UTILITIES_MULTIPLIER * dice.roll_total()),
                    held => Err(GameError::InvariantViolation(format!(
                        "owner holds {} utilities",
                        held
                    ))),
                }
            }
        }
    }

    /// Assign an unowned location to a buyer; returns the price
    pub fn purchase(
        &mut self,
        index: LocationId,
        buyer: PlayerId,
        funds: i64,
    ) -> Result<u32, GameError> {
        let location = self.location_mut(index)?;
        if !location.for_sale() {
            return Err(GameError::NotForSale(location.name.clone()));
        }
        if location.owner.is_some() {
            return Err(GameError::AlreadyOwned(location.name.clone()));
        }
        if funds < location.cost as i64 {
            return Err(GameError::CannotAfford);
        }

        location.owner = Some(buyer);
        Ok(location.cost)
    }

    /// Mortgage a location; returns the cash raised
    pub fn mortgage(&mut self, index: LocationId, player: PlayerId) -> Result<u32, GameError> {
        let location = self.location_mut(index)?;
        if location.owner != Some(player) {
            return Err(GameError::NotOwner(location.name.clone()));
        }
        if location.mortgaged {
            return Err(GameError::AlreadyMortgaged(location.name.clone()));
        }
        if location.is_developed() {
            return Err(GameError::Developed(location.name.clone()));
        }

        location.mortgaged = true;
        Ok(location.mortgage_value)
    }

    /// Price of lifting a mortgage: the mortgage value plus interest, rounded up
    pub fn unmortgage_cost(&self, index: LocationId) -> Result<u32, GameError> {
        let value = self.location(index)?.mortgage_value;
        Ok((value * (100 + UNMORTGAGE_INTEREST)).div_ceil(100))
    }

    /// Lift a mortgage; returns the cost
    pub fn unmortgage(
        &mut self,
        index: LocationId,
        player: PlayerId,
        funds: i64,
    ) -> Result<u32, GameError> {
        let cost = self.unmortgage_cost(index)?;
        let location = self.location_mut(index)?;
        if location.owner != Some(player) {
            return Err(GameError::NotOwner(location.name.clone()));
        }
        if !location.mortgaged {
            return Err(GameError::NotMortgaged(location.name.clone()));
        }
        if funds < cost as i64 {
            return Err(GameError::CannotAfford);
        }

        location.mortgaged = false;
        Ok(cost)
    }

    /// Return a location to the bank; returns the refund.
    ///
    /// The refund is the face price, less the mortgage value when mortgaged.
    /// Streets can only be sold while their whole group is bare.
    pub fn sell_to_bank(&mut self, index: LocationId, player: PlayerId) -> Result<u32, GameError> {
        let location = self.location(index)?;
        if location.owner != Some(player) {
            return Err(GameError::NotOwner(location.name.clone()));
        }
        if let Some(color) = location.color() {
            if self.group_developed(color) {
                return Err(GameError::GroupDeveloped(color.name().to_string()));
            }
        }

        let location = self.location_mut(index)?;
        let refund = if location.mortgaged {
            location.cost - location.mortgage_value
        } else {
            location.cost
        };
        location.owner = None;
        location.mortgaged = false;
        Ok(refund)
    }

    /// What building on a street would add, if the rules allow it
    pub fn check_build(&self, index: LocationId, player: PlayerId) -> Result<Structure, GameError> {
        let location = self.location(index)?;
        if location.owner != Some(player) {
            return Err(GameError::NotOwner(location.name.clone()));
        }
        let street = location
            .street()
            .ok_or_else(|| GameError::NotDevelopable(location.name.clone()))?;
        if !self.owns_colorgroup(player, street.color) {
            return Err(GameError::NotDevelopable(location.name.clone()));
        }

        let group = self.colorgroup(street.color);
        if group.iter().any(|i| self[*i].mortgaged) {
            return Err(GameError::GroupMortgaged(street.color.name().to_string()));
        }
        if street.hotel {
            return Err(GameError::MaxDevelopment(location.name.clone()));
        }

        let sibling_levels = group
            .iter()
            .filter(|i| **i != index)
            .filter_map(|i| self[*i].street())
            .map(|s| s.level());

        if street.houses < 4 {
            // Even build: only the least developed streets may gain a house
            if sibling_levels.into_iter().any(|level| level < street.houses) {
                return Err(GameError::UnevenBuild(location.name.clone()));
            }
            Ok(Structure::House(street.houses + 1))
        } else {
            if sibling_levels.into_iter().any(|level| level < 4) {
                return Err(GameError::UnevenBuild(location.name.clone()));
            }
            Ok(Structure::Hotel)
        }
    }

    /// Build one house or the hotel; returns what was built and its price
    pub fn build(
        &mut self,
        index: LocationId,
        player: PlayerId,
        funds: i64,
    ) -> Result<(Structure, u32), GameError> {
        let structure = self.check_build(index, player)?;
        let location = self.location_mut(index)?;
        let street = location
            .street_mut()
            .ok_or_else(|| GameError::InvariantViolation("built on a non-street".to_string()))?;
        if funds < street.house_cost as i64 {
            return Err(GameError::CannotAfford);
        }

        match structure {
            Structure::House(houses) => street.houses = houses,
            Structure::Hotel => {
                street.houses = 0;
                street.hotel = true;
            }
        }
        Ok((structure, street.house_cost))
    }

    /// Sell one house or the hotel back to the bank; returns the refund.
    ///
    /// A hotel reverts to four houses. A house may only come off a street at
    /// the group's highest development level.
    pub fn sell_structure(&mut self, index: LocationId, player: PlayerId) -> Result<u32, GameError> {
        let location = self.location(index)?;
        if location.owner != Some(player) {
            return Err(GameError::NotOwner(location.name.clone()));
        }
        let street = location
            .street()
            .ok_or_else(|| GameError::NotDevelopable(location.name.clone()))?;
        if !street.is_developed() {
            return Err(GameError::NoStructures(location.name.clone()));
        }
        let highest = self
            .colorgroup(street.color)
            .iter()
            .filter_map(|i| self[*i].street())
            .map(|s| s.level())
            .max()
            .unwrap_or(0);
        if street.level() < highest {
            return Err(GameError::UnevenBuild(location.name.clone()));
        }

        let location = self.location_mut(index)?;
        let street = location
            .street_mut()
            .ok_or_else(|| GameError::InvariantViolation("sold from a non-street".to_string()))?;
        if street.hotel {
            street.hotel = false;
            street.houses = 4;
        } else {
            street.houses -= 1;
        }
        Ok(street.house_cost)
    }

    /// Whether every street in the group has a hotel
    pub fn group_fully_developed(&self, color: Color) -> bool {
        self.colorgroup(color)
            .iter()
            .filter_map(|i| self[*i].street())
            .all(|s| s.hotel)
    }

    /// The street a structure should come off next: the most developed one
    pub fn next_structure_to_sell(&self, color: Color) -> Option<LocationId> {
        self.colorgroup(color)
            .into_iter()
            .filter_map(|i| self[i].street().map(|s| (i, s.level())))
            .filter(|(_, level)| *level > 0)
            .max_by_key(|(i, level)| (*level, *i))
            .map(|(i, _)| i)
    }
}
