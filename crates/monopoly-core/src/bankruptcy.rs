//! Bankruptcy resolution.
//!
//! A player whose balance goes negative liquidates one step at a time,
//! re-checking the balance after every step:
//! - Mortgage utilities, then railways, then undeveloped streets
//! - Sell utilities, then railways, then streets in bare colorgroups
//! - Sell structures, cheapest colorgroup first
//! - Mortgage and sell once more, now that stripped streets are available
//!
//! A player still in the red after all of that is eliminated.

use crate::board::{Location, LocationId, PlayerId};
use crate::events::GameEvent;
use crate::game::{Game, GameError, GamePhase};
use serde::{Deserialize, Serialize};

/// How a bankruptcy ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankruptcyOutcome {
    /// Balance is back to zero or above
    Resolved,
    /// Nothing left to liquidate
    Eliminated,
}

/// Classes of holdings, in the order they are given up
#[derive(Debug, Clone, Copy)]
enum Holding {
    Utility,
    Railway,
    Street,
}

impl Holding {
    const LIQUIDATION_ORDER: [Holding; 3] = [Holding::Utility, Holding::Railway, Holding::Street];

    fn matches(self, location: &Location) -> bool {
        match self {
            Holding::Utility => location.is_utility(),
            Holding::Railway => location.is_railway(),
            Holding::Street => location.street().is_some(),
        }
    }
}

type Step = fn(&mut Game, PlayerId, LocationId) -> Result<(), GameError>;

impl Game {
    /// Liquidate a player's holdings until the balance is non-negative
    pub(crate) fn resolve_bankruptcy(
        &mut self,
        id: PlayerId,
    ) -> Result<BankruptcyOutcome, GameError> {
        self.emit(GameEvent::BankruptcyStarted {
            player: self.name_of(id),
            balance: self.at(id).balance,
        });

        let solvent = self.mortgage_holdings(id)?
            || self.sell_holdings(id)?
            || self.sell_structures(id)?
            || self.mortgage_holdings(id)?
            || self.sell_holdings(id)?;
        if !solvent {
            return Ok(BankruptcyOutcome::Eliminated);
        }

        self.emit(GameEvent::BankruptcyResolved {
            player: self.name_of(id),
            balance: self.at(id).balance,
        });
        Ok(BankruptcyOutcome::Resolved)
    }

    /// Take a player out of the game and finish it
    pub(crate) fn eliminate(&mut self, id: PlayerId) -> GameError {
        self.at_mut(id).eliminated = true;
        let loser = self.name_of(id);
        self.emit(GameEvent::PlayerEliminated {
            player: loser.clone(),
            balance: self.at(id).balance,
        });
        self.phase = GamePhase::Finished {
            loser: loser.clone(),
        };
        GameError::GameOver { loser }
    }

    fn is_solvent(&self, id: PlayerId) -> bool {
        !self.at(id).is_bankrupt()
    }

    /// Indices of a player's holdings of one class matching `filter`, cheapest first
    fn holdings(
        &self,
        id: PlayerId,
        class: Holding,
        filter: impl Fn(&Location) -> bool,
        price: impl Fn(&Location) -> u32,
    ) -> Vec<LocationId> {
        let mut found: Vec<&Location> = self
            .holdings_of(id)
            .filter(|&l| class.matches(l) && filter(l))
            .collect();
        found.sort_by_key(|&l| (price(l), l.index));
        found.into_iter().map(|l| l.index).collect()
    }

    /// Apply `step` to each location until solvent; rule violations are skipped
    fn liquidate(
        &mut self,
        id: PlayerId,
        indices: Vec<LocationId>,
        step: Step,
    ) -> Result<bool, GameError> {
        for index in indices {
            match step(self, id, index) {
                Ok(()) if self.is_solvent(id) => return Ok(true),
                Ok(()) => {}
                Err(e) if e.is_invalid_operation() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    fn mortgage_holdings(&mut self, id: PlayerId) -> Result<bool, GameError> {
        for class in Holding::LIQUIDATION_ORDER {
            let indices = self.holdings(
                id,
                class,
                |l| !l.mortgaged && !l.is_developed(),
                |l| l.mortgage_value,
            );
            if self.liquidate(id, indices, Game::mortgage_location)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn sell_holdings(&mut self, id: PlayerId) -> Result<bool, GameError> {
        for class in Holding::LIQUIDATION_ORDER {
            let indices = self.holdings(id, class, |l| !l.is_developed(), |l| l.cost);
            if self.liquidate(id, indices, Game::sell_location)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn sell_structures(&mut self, id: PlayerId) -> Result<bool, GameError> {
        let mut colors: Vec<_> = self
            .board
            .owned_colorgroups(id)
            .into_iter()
            .filter(|c| self.board.group_developed(*c))
            .collect();
        colors.sort_by_key(|c| self.board.group_max_cost(*c));

        for color in colors {
            while let Some(index) = self.board.next_structure_to_sell(color) {
                self.sell_structure_on(id, index)?;
                if self.is_solvent(id) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
