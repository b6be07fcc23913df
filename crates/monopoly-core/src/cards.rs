//! Chance and Community Chest decks.
//!
//! Each deck holds 16 fixed cards. A card is a declarative `CardEffect`; the
//! turn engine applies it. Drawing rotates the deck: the drawn card goes to
//! the back, so 16 draws bring a deck back to its starting order.

use crate::board::LocationId;
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;

/// Number of cards in each deck
pub const DECK_SIZE: usize = 16;

/// What happens to the player who draws a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Receive money from the bank
    Collect(u32),
    /// Pay money to the bank
    Pay(u32),
    /// Move backward, never collecting salary
    MoveBack(usize),
    /// Move forward to a location, collecting salary when passing Go
    AdvanceTo(LocationId),
    /// Move backward to a location, never collecting salary
    ReturnTo(LocationId),
    GoToJail,
    GetOutOfJailFree,
    /// Pay per house and per hotel owned
    Repairs { per_house: u32, per_hotel: u32 },
    /// Every other player pays the drawer
    CollectFromEachPlayer(u32),
    /// Coin flip: pay the fine, or draw a Chance card
    FineOrChance(u32),
}

/// A card type that forms a fixed deck
pub trait Card: Copy + Debug + PartialEq {
    /// Every card in the deck, in printed order
    const ALL: [Self; DECK_SIZE];

    fn effect(&self) -> CardEffect;

    /// Text printed on the card
    fn text(&self) -> &'static str;
}

/// Chance cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanceCard {
    SpeedingFine,
    GoBackThree,
    AdvanceToMayfair,
    BankDividend,
    GoToMarylebone,
    AdvanceToGo,
    GetOutOfJailFree,
    BuildingLoan,
    AdvanceToPallMall,
    GeneralRepairs,
    StreetRepairs,
    SchoolFees,
    AdvanceToTrafalgarSquare,
    CrosswordPrize,
    DrunkInCharge,
    GoToJail,
}

impl Card for ChanceCard {
    const ALL: [Self; DECK_SIZE] = [
        ChanceCard::SpeedingFine,
        ChanceCard::GoBackThree,
        ChanceCard::AdvanceToMayfair,
        ChanceCard::BankDividend,
        ChanceCard::GoToMarylebone,
        ChanceCard::AdvanceToGo,
        ChanceCard::GetOutOfJailFree,
        ChanceCard::BuildingLoan,
        ChanceCard::AdvanceToPallMall,
        ChanceCard::GeneralRepairs,
        ChanceCard::StreetRepairs,
        ChanceCard::SchoolFees,
        ChanceCard::AdvanceToTrafalgarSquare,
        ChanceCard::CrosswordPrize,
        ChanceCard::DrunkInCharge,
        ChanceCard::GoToJail,
    ];

    fn effect(&self) -> CardEffect {
        match self {
            ChanceCard::SpeedingFine => CardEffect::Pay(15),
            ChanceCard::GoBackThree => CardEffect::MoveBack(3),
            ChanceCard::AdvanceToMayfair => CardEffect::AdvanceTo(39),
            ChanceCard::BankDividend => CardEffect::Collect(50),
            ChanceCard::GoToMarylebone => CardEffect::AdvanceTo(15),
            ChanceCard::AdvanceToGo => CardEffect::AdvanceTo(0),
            ChanceCard::GetOutOfJailFree => CardEffect::GetOutOfJailFree,
            ChanceCard::BuildingLoan => CardEffect::Collect(150),
            ChanceCard::AdvanceToPallMall => CardEffect::AdvanceTo(11),
            ChanceCard::GeneralRepairs => CardEffect::Repairs {
                per_house: 25,
                per_hotel: 100,
            },
            ChanceCard::StreetRepairs => CardEffect::Repairs {
                per_house: 40,
                per_hotel: 115,
            },
            ChanceCard::SchoolFees => CardEffect::Pay(150),
            ChanceCard::AdvanceToTrafalgarSquare => CardEffect::AdvanceTo(24),
            ChanceCard::CrosswordPrize => CardEffect::Collect(100),
            ChanceCard::DrunkInCharge => CardEffect::Pay(20),
            ChanceCard::GoToJail => CardEffect::GoToJail,
        }
    }

    fn text(&self) -> &'static str {
        match self {
            ChanceCard::SpeedingFine => "Speeding fine: pay $15",
            ChanceCard::GoBackThree => "Go back 3 spaces",
            ChanceCard::AdvanceToMayfair => "Advance to Mayfair",
            ChanceCard::BankDividend => "Bank pays you a dividend of $50",
            ChanceCard::GoToMarylebone => {
                "Take a trip to Marylebone Station. If you pass Go, collect $200"
            }
            ChanceCard::AdvanceToGo => "Advance to Go, collect $200",
            ChanceCard::GetOutOfJailFree => "Get out of jail free",
            ChanceCard::BuildingLoan => "Your building loan matures, receive $150",
            ChanceCard::AdvanceToPallMall => "Advance to Pall Mall. If you pass Go, collect $200",
            ChanceCard::GeneralRepairs => {
                "Make general repairs on all your property: $25 per house, $100 per hotel"
            }
            ChanceCard::StreetRepairs => {
                "You are assessed for street repairs: $40 per house, $115 per hotel"
            }
            ChanceCard::SchoolFees => "Pay school fees of $150",
            ChanceCard::AdvanceToTrafalgarSquare => {
                "Advance to Trafalgar Square. If you pass Go, collect $200"
            }
            ChanceCard::CrosswordPrize => "You have won a crossword competition, collect $100",
            ChanceCard::DrunkInCharge => "Drunk in charge: fine $20",
            ChanceCard::GoToJail => "Go to jail. Move directly to jail, do not pass Go",
        }
    }
}

/// Community Chest cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunityChestCard {
    FineOrChance,
    GoToJail,
    BeautyContest,
    BankError,
    DoctorsFee,
    OldKentRoad,
    Interest,
    Annuity,
    Inheritance,
    Hospital,
    InsurancePremium,
    TaxRefund,
    StockSale,
    Birthday,
    AdvanceToGo,
    GetOutOfJailFree,
}

impl Card for CommunityChestCard {
    const ALL: [Self; DECK_SIZE] = [
        CommunityChestCard::FineOrChance,
        CommunityChestCard::GoToJail,
        CommunityChestCard::BeautyContest,
        CommunityChestCard::BankError,
        CommunityChestCard::DoctorsFee,
        CommunityChestCard::OldKentRoad,
        CommunityChestCard::Interest,
        CommunityChestCard::Annuity,
        CommunityChestCard::Inheritance,
        CommunityChestCard::Hospital,
        CommunityChestCard::InsurancePremium,
        CommunityChestCard::TaxRefund,
        CommunityChestCard::StockSale,
        CommunityChestCard::Birthday,
        CommunityChestCard::AdvanceToGo,
        CommunityChestCard::GetOutOfJailFree,
    ];

    fn effect(&self) -> CardEffect {
        match self {
            CommunityChestCard::FineOrChance => CardEffect::FineOrChance(10),
            CommunityChestCard::GoToJail => CardEffect::GoToJail,
            CommunityChestCard::BeautyContest => CardEffect::Collect(10),
            CommunityChestCard::BankError => CardEffect::Collect(200),
            CommunityChestCard::DoctorsFee => CardEffect::Pay(50),
            CommunityChestCard::OldKentRoad => CardEffect::ReturnTo(1),
            CommunityChestCard::Interest => CardEffect::Collect(25),
            CommunityChestCard::Annuity => CardEffect::Collect(100),
            CommunityChestCard::Inheritance => CardEffect::Collect(100),
            CommunityChestCard::Hospital => CardEffect::Pay(100),
            CommunityChestCard::InsurancePremium => CardEffect::Pay(50),
            CommunityChestCard::TaxRefund => CardEffect::Collect(20),
            CommunityChestCard::StockSale => CardEffect::Collect(50),
            CommunityChestCard::Birthday => CardEffect::CollectFromEachPlayer(10),
            CommunityChestCard::AdvanceToGo => CardEffect::AdvanceTo(0),
            CommunityChestCard::GetOutOfJailFree => CardEffect::GetOutOfJailFree,
        }
    }

    fn text(&self) -> &'static str {
        match self {
            CommunityChestCard::FineOrChance => "Pay a $10 fine or take a Chance",
            CommunityChestCard::GoToJail => "Go to jail. Move directly to jail, do not pass Go",
            CommunityChestCard::BeautyContest => {
                "You have won second prize in a beauty contest, collect $10"
            }
            CommunityChestCard::BankError => "Bank error in your favour, collect $200",
            CommunityChestCard::DoctorsFee => "Doctor's fee, pay $50",
            CommunityChestCard::OldKentRoad => "Go back to Old Kent Road",
            CommunityChestCard::Interest => "Receive interest on 7% preference shares: $25",
            CommunityChestCard::Annuity => "Annuity matures, collect $100",
            CommunityChestCard::Inheritance => "You inherit $100",
            CommunityChestCard::Hospital => "Pay hospital $100",
            CommunityChestCard::InsurancePremium => "Pay your insurance premium of $50",
            CommunityChestCard::TaxRefund => "Income tax refund, collect $20",
            CommunityChestCard::StockSale => "From sale of stock you get $50",
            CommunityChestCard::Birthday => "It is your birthday, collect $10 from each player",
            CommunityChestCard::AdvanceToGo => "Advance to Go, collect $200",
            CommunityChestCard::GetOutOfJailFree => "Get out of jail free",
        }
    }
}

/// A deck that recycles drawn cards to the back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck<C> {
    cards: VecDeque<C>,
}

impl<C: Card> Deck<C> {
    /// The deck in printed order
    pub fn ordered() -> Self {
        Self {
            cards: C::ALL.into_iter().collect(),
        }
    }

    /// A freshly shuffled deck
    pub fn shuffled(dice: &mut Dice) -> Self {
        let mut cards = C::ALL;
        dice.shuffle(&mut cards);
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Take the front card and put it at the back
    pub fn draw(&mut self) -> C {
        // Decks are only built from `C::ALL`, so the front is always there
        let card = self.cards[0];
        self.cards.rotate_left(1);
        card
    }

    /// Cards from front to back
    pub fn cards(&self) -> impl Iterator<Item = &C> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Move a specific card to the front, for rigged tests and replays
    pub fn stack(&mut self, card: C) {
        if let Some(pos) = self.cards.iter().position(|c| *c == card) {
            self.cards.rotate_left(pos);
        }
    }
}
