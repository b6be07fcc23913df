//! Board representation: the 40 locations and their colorgroups.
//!
//! This module contains:
//! - Colorgroups and card decks referenced by locations
//! - The `LocationKind` tag carrying kind-specific state
//! - Board loading and validation from `LocationRecord`s
//! - Ownership queries used by rent and bankruptcy logic

use crate::config::{LocationRecord, RecordKind};
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

/// Player identifier (position in turn order)
pub type PlayerId = u8;

/// Board position (0-39)
pub type LocationId = usize;

/// Number of spaces on the board
pub const BOARD_SIZE: usize = 40;

/// Standard board data
const STANDARD_BOARD: &str = include_str!("../data/board.json");

/// Street colorgroups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All colorgroups in board order
    pub const ALL: [Color; 8] = [
        Color::Brown,
        Color::LightBlue,
        Color::Pink,
        Color::Orange,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
    ];

    /// Number of streets in the group
    pub fn group_size(&self) -> usize {
        match self {
            Color::Brown | Color::Blue => 2,
            _ => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Brown => "brown",
            Color::LightBlue => "light blue",
            Color::Pink => "pink",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

/// Which deck a card space draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    pub fn name(&self) -> &'static str {
        match self {
            DeckKind::Chance => "Chance",
            DeckKind::CommunityChest => "Community Chest",
        }
    }
}

/// A developable street
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    /// Colorgroup this street belongs to
    pub color: Color,
    /// Price of one house (and of the hotel)
    pub house_cost: u32,
    /// Rent with no structures
    pub base_rent: u32,
    /// Rent with 1-4 houses
    pub house_rents: [u32; 4],
    /// Rent with a hotel
    pub hotel_rent: u32,
    /// Houses built (0-4)
    pub houses: u8,
    /// Whether a hotel stands here (houses is then 0)
    pub hotel: bool,
}

impl Street {
    /// Whether any structure stands here
    pub fn is_developed(&self) -> bool {
        self.hotel || self.houses > 0
    }

    /// Development level where a hotel counts as a fifth house
    pub fn level(&self) -> u8 {
        if self.hotel {
            5
        } else {
            self.houses
        }
    }
}

/// What kind of space a location is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    /// No effect (Go, Just Visiting)
    Plain,
    /// Flat payment to the bank
    Tax { amount: u32 },
    Railway,
    Utility,
    /// Sends whoever lands here to jail
    Jail,
    FreeParking,
    /// Draw from a deck
    Card(DeckKind),
    Street(Street),
}

/// A single space on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Position on the board
    pub index: LocationId,
    pub name: String,
    /// Purchase price (0 if not for sale)
    pub cost: u32,
    /// Cash raised by mortgaging (0 if not for sale)
    pub mortgage_value: u32,
    /// Current owner, if any
    pub owner: Option<PlayerId>,
    pub mortgaged: bool,
    pub kind: LocationKind,
}

impl Location {
    fn from_record(record: LocationRecord) -> Self {
        let (cost, mortgage_value, kind) = match record.kind {
            RecordKind::Plain => (0, 0, LocationKind::Plain),
            RecordKind::Tax { amount } => (0, 0, LocationKind::Tax { amount }),
            RecordKind::Railway {
                cost,
                mortgage_value,
            } => (cost, mortgage_value, LocationKind::Railway),
            RecordKind::Utility {
                cost,
                mortgage_value,
            } => (cost, mortgage_value, LocationKind::Utility),
            RecordKind::Jail => (0, 0, LocationKind::Jail),
            RecordKind::FreeParking => (0, 0, LocationKind::FreeParking),
            RecordKind::Card { deck } => (0, 0, LocationKind::Card(deck)),
            RecordKind::Street {
                color,
                cost,
                mortgage_value,
                house_cost,
                base_rent,
                house_rents,
                hotel_rent,
            } => (
                cost,
                mortgage_value,
                LocationKind::Street(Street {
                    color,
                    house_cost,
                    base_rent,
                    house_rents,
                    hotel_rent,
                    houses: 0,
                    hotel: false,
                }),
            ),
        };

        Self {
            index: record.index,
            name: record.name,
            cost,
            mortgage_value,
            owner: None,
            mortgaged: false,
            kind,
        }
    }

    /// Whether this location can be bought
    pub fn for_sale(&self) -> bool {
        matches!(
            self.kind,
            LocationKind::Railway | LocationKind::Utility | LocationKind::Street(_)
        )
    }

    pub fn street(&self) -> Option<&Street> {
        match &self.kind {
            LocationKind::Street(street) => Some(street),
            _ => None,
        }
    }

    pub fn street_mut(&mut self) -> Option<&mut Street> {
        match &mut self.kind {
            LocationKind::Street(street) => Some(street),
            _ => None,
        }
    }

    /// Colorgroup, for streets
    pub fn color(&self) -> Option<Color> {
        self.street().map(|s| s.color)
    }

    /// Whether a house or hotel stands here
    pub fn is_developed(&self) -> bool {
        self.street().map_or(false, Street::is_developed)
    }

    pub fn is_railway(&self) -> bool {
        matches!(self.kind, LocationKind::Railway)
    }

    pub fn is_utility(&self) -> bool {
        matches!(self.kind, LocationKind::Utility)
    }
}

/// The complete game board, built only through `from_records`
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Locations ordered by index
    locations: Vec<Location>,
    /// Where jailed players sit
    jail: LocationId,
}

impl Board {
    /// The standard London board
    pub fn standard() -> Result<Self, GameError> {
        Self::from_json(STANDARD_BOARD)
    }

    /// Load a board from a JSON array of location records
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let records: Vec<LocationRecord> =
            serde_json::from_str(json).map_err(|e| GameError::InvalidBoard(e.to_string()))?;
        Self::from_records(records)
    }

    /// Build and validate a board from location records
    pub fn from_records(mut records: Vec<LocationRecord>) -> Result<Self, GameError> {
        if records.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} locations, got {}",
                BOARD_SIZE,
                records.len()
            )));
        }

        let mut seen = HashSet::new();
        for record in &records {
            if record.index >= BOARD_SIZE {
                return Err(GameError::InvalidBoard(format!(
                    "location index {} is off the board",
                    record.index
                )));
            }
            if !seen.insert(record.index) {
                return Err(GameError::InvalidBoard(format!(
                    "location index {} appears twice",
                    record.index
                )));
            }
        }

        records.sort_by_key(|r| r.index);
        let locations: Vec<Location> = records.into_iter().map(Location::from_record).collect();

        for location in locations.iter().filter(|l| l.for_sale()) {
            if location.cost == 0 || location.mortgage_value > location.cost {
                return Err(GameError::InvalidBoard(format!(
                    "{} has cost {} and mortgage value {}",
                    location.name, location.cost, location.mortgage_value
                )));
            }
        }

        for color in Color::ALL {
            let count = locations.iter().filter(|l| l.color() == Some(color)).count();
            if count != color.group_size() {
                return Err(GameError::InvalidBoard(format!(
                    "{} group has {} streets, expected {}",
                    color.name(),
                    count,
                    color.group_size()
                )));
            }
        }

        let mut jails = locations
            .iter()
            .filter(|l| matches!(l.kind, LocationKind::Jail));
        let jail = match (jails.next(), jails.next()) {
            (Some(location), None) => location.index,
            _ => {
                return Err(GameError::InvalidBoard(
                    "board needs exactly one jail".to_string(),
                ))
            }
        };

        Ok(Self { locations, jail })
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Get a location by index
    pub fn get(&self, index: LocationId) -> Option<&Location> {
        self.locations.get(index)
    }

    /// Get a location, failing on an off-board index
    pub fn location(&self, index: LocationId) -> Result<&Location, GameError> {
        self.get(index).ok_or(GameError::UnknownLocation(index))
    }

    pub(crate) fn location_mut(&mut self, index: LocationId) -> Result<&mut Location, GameError> {
        self.locations
            .get_mut(index)
            .ok_or(GameError::UnknownLocation(index))
    }

    /// Iterate over all locations in board order
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Index of the jail
    pub fn jail(&self) -> LocationId {
        self.jail
    }

    /// Position reached by moving `steps` forward, and whether Go was passed or landed on
    pub fn advance(&self, from: LocationId, steps: usize) -> (LocationId, bool) {
        let target = from + steps;
        (target % BOARD_SIZE, target >= BOARD_SIZE)
    }

    /// Position reached by moving `steps` backward
    pub fn retreat(&self, from: LocationId, steps: usize) -> LocationId {
        (from + BOARD_SIZE - steps % BOARD_SIZE) % BOARD_SIZE
    }

    /// Forward distance from one location to another
    pub fn distance(&self, from: LocationId, to: LocationId) -> usize {
        (to + BOARD_SIZE - from) % BOARD_SIZE
    }

    /// Indices of the streets in a colorgroup, in board order
    pub fn colorgroup(&self, color: Color) -> Vec<LocationId> {
        self.locations
            .iter()
            .filter(|l| l.color() == Some(color))
            .map(|l| l.index)
            .collect()
    }

    /// Price of the most expensive street in a colorgroup
    pub fn group_max_cost(&self, color: Color) -> u32 {
        self.locations
            .iter()
            .filter(|l| l.color() == Some(color))
            .map(|l| l.cost)
            .max()
            .unwrap_or(0)
    }

    /// Locations owned by a player
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(move |l| l.owner == Some(player))
    }

    /// Railways held by a player
    pub fn railways_owned(&self, player: PlayerId) -> usize {
        self.owned_by(player).filter(|l| l.is_railway()).count()
    }

    /// Utilities held by a player
    pub fn utilities_owned(&self, player: PlayerId) -> usize {
        self.owned_by(player).filter(|l| l.is_utility()).count()
    }

    /// Whether one player holds every street of a colorgroup
    pub fn owns_colorgroup(&self, player: PlayerId, color: Color) -> bool {
        self.locations
            .iter()
            .filter(|l| l.color() == Some(color))
            .all(|l| l.owner == Some(player))
    }

    /// Colorgroups fully held by a player
    pub fn owned_colorgroups(&self, player: PlayerId) -> Vec<Color> {
        Color::ALL
            .into_iter()
            .filter(|c| self.owns_colorgroup(player, *c))
            .collect()
    }

    /// Whether any street of the colorgroup carries a structure
    pub fn group_developed(&self, color: Color) -> bool {
        self.locations
            .iter()
            .filter(|l| l.color() == Some(color))
            .any(Location::is_developed)
    }

    /// Houses and hotels a player has built
    pub fn structures_owned(&self, player: PlayerId) -> (u32, u32) {
        self.owned_by(player)
            .filter_map(Location::street)
            .fold((0, 0), |(houses, hotels), s| {
                (houses + s.houses as u32, hotels + s.hotel as u32)
            })
    }
}

impl Index<LocationId> for Board {
    type Output = Location;

    fn index(&self, index: LocationId) -> &Location {
        &self.locations[index]
    }
}

impl IndexMut<LocationId> for Board {
    fn index_mut(&mut self, index: LocationId) -> &mut Location {
        &mut self.locations[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Board {
        Board::standard().unwrap()
    }

    #[test]
    fn test_standard_board_has_40_locations() {
        let board = standard();
        assert_eq!(board.len(), BOARD_SIZE);
        for (i, location) in board.iter().enumerate() {
            assert_eq!(location.index, i);
        }
    }

    #[test]
    fn test_standard_board_landmarks() {
        let board = standard();
        assert_eq!(board[0].name, "Go");
        assert_eq!(board.jail(), 30);
        assert_eq!(board[39].name, "Mayfair");
        assert_eq!(board[2].kind, LocationKind::Card(DeckKind::CommunityChest));
        assert_eq!(board[7].kind, LocationKind::Card(DeckKind::Chance));
        assert_eq!(board[4].kind, LocationKind::Tax { amount: 200 });
        assert_eq!(board[38].kind, LocationKind::Tax { amount: 100 });
    }

    #[test]
    fn test_standard_board_counts() {
        let board = standard();
        assert_eq!(board.iter().filter(|l| l.is_railway()).count(), 4);
        assert_eq!(board.iter().filter(|l| l.is_utility()).count(), 2);
        assert_eq!(board.iter().filter(|l| l.street().is_some()).count(), 22);
        assert_eq!(board.iter().filter(|l| l.for_sale()).count(), 28);
    }

    #[test]
    fn test_colorgroup_sizes() {
        let board = standard();
        for color in Color::ALL {
            assert_eq!(board.colorgroup(color).len(), color.group_size());
        }
        assert_eq!(board.colorgroup(Color::Brown), vec![1, 3]);
        assert_eq!(board.colorgroup(Color::Blue), vec![37, 39]);
    }

    #[test]
    fn test_group_max_cost() {
        let board = standard();
        assert_eq!(board.group_max_cost(Color::Brown), 60);
        assert_eq!(board.group_max_cost(Color::Blue), 400);
        assert_eq!(board.group_max_cost(Color::Green), 320);
    }

    #[test]
    fn test_advance_wraps_past_go() {
        let board = standard();
        assert_eq!(board.advance(38, 3), (1, true));
        assert_eq!(board.advance(36, 4), (0, true));
        assert_eq!(board.advance(10, 5), (15, false));
    }

    #[test]
    fn test_retreat_wraps_backward() {
        let board = standard();
        assert_eq!(board.retreat(7, 3), 4);
        assert_eq!(board.retreat(2, 3), 39);
    }

    #[test]
    fn test_distance() {
        let board = standard();
        assert_eq!(board.distance(36, 0), 4);
        assert_eq!(board.distance(22, 11), 29);
        assert_eq!(board.distance(5, 5), 0);
    }

    #[test]
    fn test_owns_colorgroup() {
        let mut board = standard();
        board[1].owner = Some(0);
        assert!(!board.owns_colorgroup(0, Color::Brown));
        board[3].owner = Some(0);
        assert!(board.owns_colorgroup(0, Color::Brown));
        assert_eq!(board.owned_colorgroups(0), vec![Color::Brown]);
        assert!(board.owned_colorgroups(1).is_empty());
    }

    #[test]
    fn test_rejects_short_board() {
        let mut records: Vec<LocationRecord> = serde_json::from_str(STANDARD_BOARD).unwrap();
        records.pop();
        assert!(matches!(
            Board::from_records(records),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_index() {
        let mut records: Vec<LocationRecord> = serde_json::from_str(STANDARD_BOARD).unwrap();
        records[1].index = 0;
        assert!(matches!(
            Board::from_records(records),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_colorgroup() {
        let mut records: Vec<LocationRecord> = serde_json::from_str(STANDARD_BOARD).unwrap();
        if let RecordKind::Street { color, .. } = &mut records[39].kind {
            *color = Color::Green;
        }
        assert!(matches!(
            Board::from_records(records),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_rejects_mortgage_above_cost() {
        let mut records: Vec<LocationRecord> = serde_json::from_str(STANDARD_BOARD).unwrap();
        if let RecordKind::Railway { mortgage_value, .. } = &mut records[5].kind {
            *mortgage_value = 300;
        }
        assert!(matches!(
            Board::from_records(records),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_rejects_free_street() {
        let mut records: Vec<LocationRecord> = serde_json::from_str(STANDARD_BOARD).unwrap();
        if let RecordKind::Street {
            cost,
            mortgage_value,
            ..
        } = &mut records[1].kind
        {
            *cost = 0;
            *mortgage_value = 0;
        }
        assert!(matches!(
            Board::from_records(records),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            Board::from_json("[{\"index\": 0}]"),
            Err(GameError::InvalidBoard(_))
        ));
    }
}
