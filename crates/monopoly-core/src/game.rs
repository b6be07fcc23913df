//! Core game state machine.
//!
//! This module contains the `Game` struct, the turn engine and the manual
//! operations hosts may call between turns.

use crate::bankruptcy::BankruptcyOutcome;
use crate::board::{Board, Color, DeckKind, Location, LocationId, LocationKind, PlayerId};
use crate::cards::{Card, CardEffect, ChanceCard, CommunityChestCard, Deck};
use crate::config::GameConfig;
use crate::dice::Dice;
use crate::events::{GameEvent, JailRelease};
use crate::player::{Player, PlayerState, Strategy};
use crate::property::Structure;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;

/// Most players a game can seat
pub const MAX_PLAYERS: usize = 8;

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Turns are being played
    InProgress,

    /// A player could not resolve bankruptcy
    Finished { loser: String },
}

/// Errors that can occur while running a game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player {0} is already seated")]
    DuplicatePlayer(String),

    #[error("A game needs between 2 and {} players, got {0}", MAX_PLAYERS)]
    InvalidPlayerCount(usize),

    #[error("{0} has been eliminated")]
    PlayerEliminated(String),

    #[error("No location at index {0}")]
    UnknownLocation(LocationId),

    #[error("{0} is not for sale")]
    NotForSale(String),

    #[error("{0} already has an owner")]
    AlreadyOwned(String),

    #[error("You do not own {0}")]
    NotOwner(String),

    #[error("Cannot afford this")]
    CannotAfford,

    #[error("{0} is already mortgaged")]
    AlreadyMortgaged(String),

    #[error("{0} is not mortgaged")]
    NotMortgaged(String),

    #[error("{0} has structures on it")]
    Developed(String),

    #[error("The {0} group has structures on it")]
    GroupDeveloped(String),

    #[error("The {0} group has a mortgaged street")]
    GroupMortgaged(String),

    #[error("{0} cannot be developed")]
    NotDevelopable(String),

    #[error("Building on {0} would break the even-build rule")]
    UnevenBuild(String),

    #[error("{0} already has a hotel")]
    MaxDevelopment(String),

    #[error("{0} has no structures")]
    NoStructures(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Game over: {loser} is bankrupt")]
    GameOver { loser: String },
}

impl GameError {
    /// Rule violations a caller can recover from by choosing something else
    pub fn is_invalid_operation(&self) -> bool {
        !matches!(
            self,
            GameError::InvariantViolation(_) | GameError::InvalidBoard(_) | GameError::GameOver { .. }
        )
    }
}

/// A location as seen from its owner's holdings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub index: LocationId,
    pub name: String,
    pub color: Option<Color>,
    pub mortgaged: bool,
    pub houses: u8,
    pub hotel: bool,
}

/// Read-only view of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub balance: i64,
    pub position: LocationId,
    pub location: String,
    pub state: PlayerState,
    pub in_jail: bool,
    pub has_get_out_of_jail_free: bool,
    pub eliminated: bool,
    pub net_worth: i64,
    pub assets: Vec<Asset>,
    pub colorgroups: Vec<Color>,
}

/// Read-only view of the whole game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub phase: GamePhase,
    pub players: Vec<PlayerSnapshot>,
}

/// Where a jailed player ends up after trying to leave
enum JailOutcome {
    /// Still in jail; the turn is over
    Stayed,
    /// Free, with the roll to move by if one was already made
    Released(Option<(u8, u8)>),
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// All players, in seating order
    pub players: Vec<Player>,
    pub chance: Deck<ChanceCard>,
    pub community_chest: Deck<CommunityChestCard>,
    /// Every source of randomness
    pub dice: Dice,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Turns played so far
    pub turn: u32,
    /// Every event since the game started
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a game on the standard board
    pub fn start<S: AsRef<str>>(names: &[S], config: GameConfig) -> Result<Self, GameError> {
        Self::with_board(names, Board::standard()?, config)
    }

    /// Start a game on a custom board
    pub fn with_board<S: AsRef<str>>(
        names: &[S],
        board: Board,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if names.len() < 2 || names.len() > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(names.len()));
        }
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.as_ref()) {
                return Err(GameError::DuplicatePlayer(name.as_ref().to_string()));
            }
        }

        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Player::new(i as PlayerId, name.as_ref().to_string(), config.starting_balance)
            })
            .collect();

        let mut dice = match config.seed {
            Some(seed) => Dice::seeded(seed),
            None => Dice::from_entropy(),
        };
        let chance = Deck::shuffled(&mut dice);
        let community_chest = Deck::shuffled(&mut dice);

        Ok(Self {
            board,
            players,
            chance,
            community_chest,
            dice,
            config,
            phase: GamePhase::InProgress,
            turn: 0,
            events: Vec::new(),
        })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Name of the eliminated player, once the game is over
    pub fn loser(&self) -> Option<&str> {
        match &self.phase {
            GamePhase::Finished { loser } => Some(loser),
            GamePhase::InProgress => None,
        }
    }

    /// Every event since the game started
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Look up a player by name
    pub fn player(&self, name: &str) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    pub(crate) fn at(&self, id: PlayerId) -> &Player {
        &self.players[id as usize]
    }

    pub(crate) fn at_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id as usize]
    }

    pub(crate) fn name_of(&self, id: PlayerId) -> String {
        self.at(id).name.clone()
    }

    pub(crate) fn location_name(&self, index: LocationId) -> String {
        self.board[index].name.clone()
    }

    /// Log an event and append it to the journal
    pub(crate) fn emit(&mut self, event: GameEvent) {
        event.log();
        self.events.push(event);
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match &self.phase {
            GamePhase::InProgress => Ok(()),
            GamePhase::Finished { loser } => Err(GameError::GameOver {
                loser: loser.clone(),
            }),
        }
    }

    /// Resolve a name to a player still in the game
    fn active_player(&self, name: &str) -> Result<PlayerId, GameError> {
        self.ensure_in_progress()?;
        let player = self.player(name)?;
        if player.eliminated {
            return Err(GameError::PlayerEliminated(player.name.clone()));
        }
        Ok(player.id)
    }

    // ==================== Orchestration ====================

    /// Everyone rolls once; the first strictly highest roll starts
    pub fn pick_starter(&mut self) -> String {
        let mut best: Option<(PlayerId, u8)> = None;
        for id in 0..self.players.len() as PlayerId {
            if self.at(id).eliminated {
                continue;
            }
            let (a, b) = self.dice.roll();
            let total = a + b;
            self.emit(GameEvent::StarterRoll {
                player: self.name_of(id),
                total,
            });
            if best.map_or(true, |(_, top)| total > top) {
                best = Some((id, total));
            }
        }

        let starter = best.map_or(0, |(id, _)| id);
        let player = self.name_of(starter);
        self.emit(GameEvent::StarterChosen {
            player: player.clone(),
        });
        player
    }

    /// The next player still in the game, in seating order
    pub fn pick_next_player(&self, name: &str) -> Result<String, GameError> {
        let current = self.player(name)?.id as usize;
        let count = self.players.len();
        (1..=count)
            .map(|offset| &self.players[(current + offset) % count])
            .find(|p| !p.eliminated)
            .map(|p| p.name.clone())
            .ok_or_else(|| GameError::InvariantViolation("no players left".to_string()))
    }

    /// Play one full turn, including any extra rolls from doubles.
    ///
    /// Returns the events of this turn. When a player is eliminated the game
    /// finishes and `GameError::GameOver` is returned, now and on every later
    /// call.
    pub fn play_turn(&mut self, name: &str) -> Result<Vec<GameEvent>, GameError> {
        let id = self.active_player(name)?;
        let first_event = self.events.len();

        self.turn += 1;
        self.emit(GameEvent::TurnStarted {
            player: self.name_of(id),
            turn: self.turn,
        });

        if self.config.auto_develop {
            self.attempt_building(id)?;
        }

        let mut next_roll = None;
        if self.at(id).in_jail {
            match self.leave_jail(id)? {
                JailOutcome::Stayed => return Ok(self.events[first_event..].to_vec()),
                JailOutcome::Released(roll) => next_roll = roll,
            }
        }

        loop {
            let roll = match next_roll.take() {
                Some(roll) => roll,
                None => self.dice.roll(),
            };
            let (a, b) = roll;
            self.emit(GameEvent::DiceRolled {
                player: self.name_of(id),
                roll,
                total: a + b,
            });

            if self.at_mut(id).record_roll(roll) {
                self.emit(GameEvent::ThreeDoubles {
                    player: self.name_of(id),
                });
                self.send_to_jail(id);
                break;
            }

            self.advance(id, (a + b) as usize)?;
            self.settle_debts()?;

            if a != b || self.at(id).in_jail {
                break;
            }
        }

        Ok(self.events[first_event..].to_vec())
    }

    // ==================== Jail ====================

    fn send_to_jail(&mut self, id: PlayerId) {
        let jail = self.board.jail();
        self.at_mut(id).send_to_jail(jail);
        self.emit(GameEvent::WentToJail {
            player: self.name_of(id),
        });
    }

    /// Card first, then a coin flip between the fine and a doubles attempt
    fn leave_jail(&mut self, id: PlayerId) -> Result<JailOutcome, GameError> {
        if self.at(id).has_get_out_of_jail_free {
            let player = self.at_mut(id);
            player.has_get_out_of_jail_free = false;
            player.release_from_jail();
            self.emit(GameEvent::LeftJail {
                player: self.name_of(id),
                release: JailRelease::Card,
                paid: 0,
            });
            return Ok(JailOutcome::Released(None));
        }

        if self.dice.coin_flip() {
            self.pay_jail_fine(id, JailRelease::Fine)?;
            return Ok(JailOutcome::Released(None));
        }

        let roll = self.dice.roll();
        let attempt = {
            let player = self.at_mut(id);
            player.jail_attempts += 1;
            player.jail_attempts
        };

        if roll.0 == roll.1 {
            self.at_mut(id).release_from_jail();
            self.emit(GameEvent::LeftJail {
                player: self.name_of(id),
                release: JailRelease::Doubles,
                paid: 0,
            });
            return Ok(JailOutcome::Released(Some(roll)));
        }

        if attempt >= self.config.max_jail_attempts {
            self.pay_jail_fine(id, JailRelease::ForcedFine)?;
            return Ok(JailOutcome::Released(Some(roll)));
        }

        self.emit(GameEvent::StayedInJail {
            player: self.name_of(id),
            roll,
            attempt,
        });
        Ok(JailOutcome::Stayed)
    }

    fn pay_jail_fine(&mut self, id: PlayerId, release: JailRelease) -> Result<(), GameError> {
        let fine = self.config.jail_fine;
        let player = self.at_mut(id);
        player.balance -= fine;
        player.release_from_jail();
        self.emit(GameEvent::LeftJail {
            player: self.name_of(id),
            release,
            paid: fine,
        });
        self.settle_debts()
    }

    // ==================== Movement ====================

    /// Move forward, collecting salary on passing or landing on Go
    fn advance(&mut self, id: PlayerId, steps: usize) -> Result<(), GameError> {
        let (to, passed_go) = self.board.advance(self.at(id).position, steps);
        if passed_go {
            let salary = self.config.salary;
            self.at_mut(id).balance += salary;
            self.emit(GameEvent::SalaryCollected {
                player: self.name_of(id),
                amount: salary,
            });
        }
        self.land(id, to)
    }

    /// Put the player on a location and resolve it
    fn land(&mut self, id: PlayerId, to: LocationId) -> Result<(), GameError> {
        self.at_mut(id).position = to;
        self.emit(GameEvent::Moved {
            player: self.name_of(id),
            to,
            location: self.location_name(to),
        });
        self.transact(id, to)
    }

    /// Apply whatever the location does to the player standing on it
    fn transact(&mut self, id: PlayerId, index: LocationId) -> Result<(), GameError> {
        match self.board[index].kind {
            LocationKind::Jail => {
                self.send_to_jail(id);
                return Ok(());
            }
            LocationKind::Card(deck) => return self.draw_card(id, deck),
            _ => {}
        }

        let location = &self.board[index];
        if location.for_sale() {
            match location.owner {
                None => {
                    let player = self.at(id);
                    if player.auto_purchase && player.can_afford(location.cost) {
                        self.purchase_location(id, index)?;
                    }
                }
                Some(owner) if owner != id => self.pay_rent(id, owner, index)?,
                Some(_) => {}
            }
            return Ok(());
        }

        let amount = self.board.rent(index, &mut self.dice)?;
        if amount > 0 {
            self.at_mut(id).debit(amount);
            self.emit(GameEvent::TaxPaid {
                player: self.name_of(id),
                location: self.location_name(index),
                amount,
            });
        }
        Ok(())
    }

    fn pay_rent(&mut self, id: PlayerId, owner: PlayerId, index: LocationId) -> Result<(), GameError> {
        let amount = self.board.rent(index, &mut self.dice)?;
        if amount == 0 {
            return Ok(());
        }
        self.at_mut(id).debit(amount);
        self.at_mut(owner).credit(amount);
        self.emit(GameEvent::RentPaid {
            player: self.name_of(id),
            owner: self.name_of(owner),
            location: self.location_name(index),
            amount,
        });
        Ok(())
    }

    // ==================== Cards ====================

    fn draw_card(&mut self, id: PlayerId, deck: DeckKind) -> Result<(), GameError> {
        let (text, effect) = match deck {
            DeckKind::Chance => {
                let card = self.chance.draw();
                (card.text(), card.effect())
            }
            DeckKind::CommunityChest => {
                let card = self.community_chest.draw();
                (card.text(), card.effect())
            }
        };
        self.emit(GameEvent::CardDrawn {
            player: self.name_of(id),
            deck,
            text: text.to_string(),
        });
        self.apply_card(id, effect)
    }

    fn apply_card(&mut self, id: PlayerId, effect: CardEffect) -> Result<(), GameError> {
        let position = self.at(id).position;
        match effect {
            CardEffect::Collect(amount) => {
                self.at_mut(id).credit(amount);
                self.emit(GameEvent::CardCollected {
                    player: self.name_of(id),
                    amount,
                });
            }
            CardEffect::Pay(amount) => self.pay_bank(id, amount),
            CardEffect::MoveBack(steps) => {
                let to = self.board.retreat(position, steps);
                self.land(id, to)?;
            }
            CardEffect::AdvanceTo(target) => {
                let steps = self.board.distance(position, target);
                self.advance(id, steps)?;
            }
            CardEffect::ReturnTo(target) => self.land(id, target)?,
            CardEffect::GoToJail => self.send_to_jail(id),
            CardEffect::GetOutOfJailFree => {
                self.at_mut(id).has_get_out_of_jail_free = true;
                self.emit(GameEvent::GetOutOfJailFreeReceived {
                    player: self.name_of(id),
                });
            }
            CardEffect::Repairs {
                per_house,
                per_hotel,
            } => {
                let (houses, hotels) = self.board.structures_owned(id);
                self.pay_bank(id, houses * per_house + hotels * per_hotel);
            }
            CardEffect::CollectFromEachPlayer(amount) => {
                let others: Vec<PlayerId> = self
                    .players
                    .iter()
                    .filter(|p| p.id != id && !p.eliminated)
                    .map(|p| p.id)
                    .collect();
                for other in others {
                    self.at_mut(other).debit(amount);
                    self.at_mut(id).credit(amount);
                    self.emit(GameEvent::PlayerPaid {
                        from: self.name_of(other),
                        to: self.name_of(id),
                        amount,
                    });
                }
            }
            CardEffect::FineOrChance(fine) => {
                if self.dice.coin_flip() {
                    self.draw_card(id, DeckKind::Chance)?;
                } else {
                    self.pay_bank(id, fine);
                }
            }
        }
        Ok(())
    }

    fn pay_bank(&mut self, id: PlayerId, amount: u32) {
        self.at_mut(id).debit(amount);
        self.emit(GameEvent::CardPaid {
            player: self.name_of(id),
            amount,
        });
    }

    // ==================== Debts ====================

    /// Run bankruptcy resolution for every player in the red
    fn settle_debts(&mut self) -> Result<(), GameError> {
        for id in 0..self.players.len() as PlayerId {
            let player = self.at(id);
            if player.eliminated || !player.is_bankrupt() {
                continue;
            }
            if self.resolve_bankruptcy(id)? == BankruptcyOutcome::Eliminated {
                return Err(self.eliminate(id));
            }
        }
        Ok(())
    }

    // ==================== Property operations ====================

    fn purchase_location(&mut self, id: PlayerId, index: LocationId) -> Result<(), GameError> {
        let cost = self.board.purchase(index, id, self.at(id).balance)?;
        let player = self.at_mut(id);
        player.debit(cost);
        player.properties.insert(index);
        self.emit(GameEvent::Purchased {
            player: self.name_of(id),
            location: self.location_name(index),
            cost,
        });

        if let Some(color) = self.board[index].color() {
            if self.board.owns_colorgroup(id, color) {
                self.emit(GameEvent::ColorgroupCompleted {
                    player: self.name_of(id),
                    color,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn mortgage_location(
        &mut self,
        id: PlayerId,
        index: LocationId,
    ) -> Result<(), GameError> {
        let amount = self.board.mortgage(index, id)?;
        self.at_mut(id).credit(amount);
        self.emit(GameEvent::Mortgaged {
            player: self.name_of(id),
            location: self.location_name(index),
            amount,
        });
        Ok(())
    }

    fn unmortgage_location(&mut self, id: PlayerId, index: LocationId) -> Result<(), GameError> {
        let amount = self.board.unmortgage(index, id, self.at(id).balance)?;
        self.at_mut(id).debit(amount);
        self.emit(GameEvent::Unmortgaged {
            player: self.name_of(id),
            location: self.location_name(index),
            amount,
        });
        Ok(())
    }

    pub(crate) fn sell_location(&mut self, id: PlayerId, index: LocationId) -> Result<(), GameError> {
        let refund = self.board.sell_to_bank(index, id)?;
        let player = self.at_mut(id);
        player.credit(refund);
        player.properties.remove(&index);
        self.emit(GameEvent::PropertySold {
            player: self.name_of(id),
            location: self.location_name(index),
            refund,
        });
        Ok(())
    }

    fn build_structure(&mut self, id: PlayerId, index: LocationId) -> Result<(), GameError> {
        let (structure, cost) = self.board.build(index, id, self.at(id).balance)?;
        self.at_mut(id).debit(cost);
        let player = self.name_of(id);
        let location = self.location_name(index);
        match structure {
            Structure::House(houses) => self.emit(GameEvent::HouseBuilt {
                player,
                location,
                houses,
            }),
            Structure::Hotel => self.emit(GameEvent::HotelBuilt { player, location }),
        }
        Ok(())
    }

    pub(crate) fn sell_structure_on(
        &mut self,
        id: PlayerId,
        index: LocationId,
    ) -> Result<(), GameError> {
        let refund = self.board.sell_structure(index, id)?;
        self.at_mut(id).credit(refund);
        self.emit(GameEvent::StructureSold {
            player: self.name_of(id),
            location: self.location_name(index),
            refund,
        });
        Ok(())
    }

    /// Sweep a colorgroup building what the even rule allows.
    ///
    /// Stops once every street has a hotel, as soon as the next structure is
    /// unaffordable, or when a full sweep builds nothing. Returns the number
    /// of structures built.
    fn develop(&mut self, id: PlayerId, color: Color) -> Result<u32, GameError> {
        let group = self.board.colorgroup(color);
        let mut built = 0;
        loop {
            if self.board.group_fully_developed(color) {
                return Ok(built);
            }
            let mut progressed = false;
            for &index in &group {
                let house_cost = self.board[index].street().map_or(0, |s| s.house_cost);
                if !self.at(id).can_afford(house_cost) {
                    return Ok(built);
                }
                match self.build_structure(id, index) {
                    Ok(()) => {
                        built += 1;
                        progressed = true;
                    }
                    Err(e) if e.is_invalid_operation() => {}
                    Err(e) => return Err(e),
                }
            }
            if !progressed {
                return Ok(built);
            }
        }
    }

    /// Develop every colorgroup the player holds, in strategy order
    fn attempt_building(&mut self, id: PlayerId) -> Result<(), GameError> {
        let mut colors = self.board.owned_colorgroups(id);
        match self.at(id).strategy {
            Strategy::Greedy => colors.sort_by_key(|c| Reverse(self.board.group_max_cost(*c))),
            Strategy::Random => self.dice.shuffle(&mut colors),
        }
        for color in colors {
            self.develop(id, color)?;
        }
        Ok(())
    }

    // ==================== Manual operations ====================

    /// Buy the location the player is standing on
    pub fn purchase(&mut self, name: &str) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        let index = self.at(id).position;
        self.purchase_location(id, index)
    }

    pub fn mortgage(&mut self, name: &str, index: LocationId) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        self.board.location(index)?;
        self.mortgage_location(id, index)
    }

    pub fn unmortgage(&mut self, name: &str, index: LocationId) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        self.board.location(index)?;
        self.unmortgage_location(id, index)
    }

    /// Sell a location back to the bank
    pub fn sell_property(&mut self, name: &str, index: LocationId) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        self.board.location(index)?;
        self.sell_location(id, index)
    }

    /// Build one house or hotel on a street
    pub fn build(&mut self, name: &str, index: LocationId) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        self.board.location(index)?;
        self.build_structure(id, index)
    }

    /// Sell one house or hotel from a street
    pub fn sell_structure(&mut self, name: &str, index: LocationId) -> Result<(), GameError> {
        let id = self.active_player(name)?;
        self.board.location(index)?;
        self.sell_structure_on(id, index)
    }

    /// Develop one held colorgroup as far as the player's cash allows
    pub fn develop_colorgroup(&mut self, name: &str, color: Color) -> Result<u32, GameError> {
        let id = self.active_player(name)?;
        if !self.board.owns_colorgroup(id, color) {
            return Err(GameError::NotDevelopable(color.name().to_string()));
        }
        self.develop(id, color)
    }

    // ==================== Queries ====================

    pub fn balance(&self, name: &str) -> Result<i64, GameError> {
        Ok(self.player(name)?.balance)
    }

    /// Locations held by a player, in board order
    pub fn assets(&self, name: &str) -> Result<Vec<Asset>, GameError> {
        Ok(self.assets_of(self.player(name)?.id))
    }

    /// Locations in the player's holdings, in board order
    pub(crate) fn holdings_of(&self, id: PlayerId) -> impl Iterator<Item = &Location> {
        debug_assert!(
            self.board
                .owned_by(id)
                .map(|l| l.index)
                .eq(self.at(id).properties.iter().copied()),
            "holdings of {} disagree with board ownership",
            self.at(id).name
        );
        self.at(id)
            .properties
            .iter()
            .filter_map(|&index| self.board.get(index))
    }

    fn assets_of(&self, id: PlayerId) -> Vec<Asset> {
        self.holdings_of(id)
            .map(|l| Asset {
                index: l.index,
                name: l.name.clone(),
                color: l.color(),
                mortgaged: l.mortgaged,
                houses: l.street().map_or(0, |s| s.houses),
                hotel: l.street().map_or(false, |s| s.hotel),
            })
            .collect()
    }

    pub fn owned_colorgroups(&self, name: &str) -> Result<Vec<Color>, GameError> {
        Ok(self.board.owned_colorgroups(self.player(name)?.id))
    }

    /// Cash plus what selling every structure and location would raise
    pub fn net_worth(&self, name: &str) -> Result<i64, GameError> {
        Ok(self.net_worth_of(self.player(name)?.id))
    }

    fn net_worth_of(&self, id: PlayerId) -> i64 {
        let holdings: i64 = self
            .holdings_of(id)
            .map(|l| {
                let face = if l.mortgaged {
                    l.cost - l.mortgage_value
                } else {
                    l.cost
                };
                let structures = l
                    .street()
                    .map_or(0, |s| s.level() as u32 * s.house_cost);
                (face + structures) as i64
            })
            .sum();
        self.at(id).balance + holdings
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let players = self
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                name: p.name.clone(),
                balance: p.balance,
                position: p.position,
                location: self.location_name(p.position),
                state: p.state(),
                in_jail: p.in_jail,
                has_get_out_of_jail_free: p.has_get_out_of_jail_free,
                eliminated: p.eliminated,
                net_worth: self.net_worth_of(p.id),
                assets: self.assets_of(p.id),
                colorgroups: self.board.owned_colorgroups(p.id),
            })
            .collect();

        GameSnapshot {
            turn: self.turn,
            phase: self.phase.clone(),
            players,
        }
    }
}
