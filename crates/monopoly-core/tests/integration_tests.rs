//! Integration tests for the Monopoly engine.
//!
//! These tests drive whole turns through `Game::play_turn` with loaded dice and
//! stacked decks, and play complete seeded games checking the economic
//! invariants after every turn.

use monopoly_core::*;
use pretty_assertions::assert_eq;

const OLD_KENT_ROAD: LocationId = 1;
const COMMUNITY_CHEST: LocationId = 2;
const INCOME_TAX: LocationId = 4;
const ANGEL: LocationId = 6;
const EUSTON: LocationId = 8;
const PENTONVILLE: LocationId = 9;
const PALL_MALL: LocationId = 11;
const ELECTRIC_COMPANY: LocationId = 12;
const WATER_WORKS: LocationId = 28;
const MAYFAIR: LocationId = 39;

/// A seeded game with automatic building switched off
fn game(names: &[&str]) -> Game {
    let config = GameConfig {
        auto_develop: false,
        ..GameConfig::seeded(11)
    };
    Game::start(names, config).unwrap()
}

fn give(game: &mut Game, player: &str, indices: &[LocationId]) {
    let id = game.player(player).unwrap().id;
    for index in indices {
        game.board[*index].owner = Some(id);
        game.players[id as usize].properties.insert(*index);
    }
}

fn salaries(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::SalaryCollected { .. }))
        .count()
}

/// No two streets in a colorgroup differ by more than one level
fn assert_even_build(board: &Board) {
    for color in Color::ALL {
        let levels: Vec<u8> = board
            .colorgroup(color)
            .iter()
            .filter_map(|i| board[*i].street())
            .map(|s| s.level())
            .collect();
        let max = levels.iter().max().copied().unwrap_or(0);
        let min = levels.iter().min().copied().unwrap_or(0);
        assert!(max - min <= 1, "{:?} is unevenly built: {:?}", color, levels);
    }
}

/// Every player still in the game is solvent
fn assert_solvent(game: &Game) {
    for player in &game.players {
        if !player.eliminated {
            assert!(
                player.balance >= 0,
                "{} has a negative balance of {}",
                player.name,
                player.balance
            );
        }
    }
}

// ==================== Movement ====================

#[test]
fn test_passing_go_pays_salary_once() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 38;
    game.dice.load([(1, 2)]);

    let events = game.play_turn("Alice").unwrap();
    let alice = game.player("Alice").unwrap();
    assert_eq!(alice.position, OLD_KENT_ROAD);
    assert_eq!(salaries(&events), 1);
    // Salary, then Old Kent Road bought for 60
    assert_eq!(alice.balance, 1500 + 200 - 60);
}

#[test]
fn test_passing_go_then_community_chest() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 38;
    game.community_chest.stack(CommunityChestCard::BankError);
    game.dice.load([(1, 3)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, COMMUNITY_CHEST);
    assert_eq!(salaries(&events), 1);
    assert_eq!(game.balance("Alice").unwrap(), 1500 + 200 + 200);
    assert!(events.contains(&GameEvent::CardDrawn {
        player: "Alice".to_string(),
        deck: DeckKind::CommunityChest,
        text: CommunityChestCard::BankError.text().to_string(),
    }));
}

#[test]
fn test_advance_to_go_pays_once() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 33;
    game.chance.stack(ChanceCard::AdvanceToGo);
    game.dice.load([(1, 2)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, 0);
    assert_eq!(salaries(&events), 1);
    assert_eq!(game.balance("Alice").unwrap(), 1700);
}

#[test]
fn test_advance_past_go_wraps_once() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 33;
    game.chance.stack(ChanceCard::AdvanceToPallMall);
    game.dice.load([(1, 2)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, PALL_MALL);
    assert_eq!(salaries(&events), 1);
    assert_eq!(game.board[PALL_MALL].owner, Some(0));
    assert_eq!(game.balance("Alice").unwrap(), 1500 + 200 - 140);
}

#[test]
fn test_advance_without_wrap_pays_no_salary() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 33;
    game.chance.stack(ChanceCard::AdvanceToMayfair);
    game.dice.load([(1, 2)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, MAYFAIR);
    assert_eq!(salaries(&events), 0);
    assert_eq!(game.balance("Alice").unwrap(), 1100);
}

#[test]
fn test_go_back_three_lands_on_tax() {
    let mut game = game(&["Alice", "Bob"]);
    game.chance.stack(ChanceCard::GoBackThree);
    game.dice.load([(3, 4)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, INCOME_TAX);
    assert_eq!(salaries(&events), 0);
    assert_eq!(game.balance("Alice").unwrap(), 1300);
}

#[test]
fn test_return_to_old_kent_road_skips_salary() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 30;
    game.community_chest.stack(CommunityChestCard::OldKentRoad);
    game.dice.load([(1, 2)]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().position, OLD_KENT_ROAD);
    assert_eq!(salaries(&events), 0);
    assert_eq!(game.balance("Alice").unwrap(), 1440);
}

// ==================== Cards ====================

#[test]
fn test_birthday_collects_from_everyone_else() {
    let mut game = game(&["Alice", "Bob", "Carol"]);
    game.players[0].position = 14;
    game.community_chest.stack(CommunityChestCard::Birthday);
    game.dice.load([(1, 2)]);

    game.play_turn("Alice").unwrap();
    assert_eq!(game.balance("Alice").unwrap(), 1520);
    assert_eq!(game.balance("Bob").unwrap(), 1490);
    assert_eq!(game.balance("Carol").unwrap(), 1490);
}

#[test]
fn test_birthday_can_bankrupt_another_player() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 14;
    game.players[1].balance = 5;
    game.community_chest.stack(CommunityChestCard::Birthday);
    game.dice.load([(1, 2)]);

    let err = game.play_turn("Alice").unwrap_err();
    assert_eq!(
        err,
        GameError::GameOver {
            loser: "Bob".to_string()
        }
    );
    assert!(game.player("Bob").unwrap().eliminated);
    assert!(game.is_finished());

    // The game stays over
    assert_eq!(game.play_turn("Alice").unwrap_err(), err);
}

#[test]
fn test_fine_or_chance_pays_fine() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 14;
    game.community_chest.stack(CommunityChestCard::FineOrChance);
    game.dice.load([(1, 2)]);
    game.dice.load_flips([false]);

    game.play_turn("Alice").unwrap();
    assert_eq!(game.balance("Alice").unwrap(), 1490);
}

#[test]
fn test_fine_or_chance_draws_chance() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].position = 14;
    game.community_chest.stack(CommunityChestCard::FineOrChance);
    game.chance.stack(ChanceCard::BankDividend);
    game.dice.load([(1, 2)]);
    game.dice.load_flips([true]);

    let events = game.play_turn("Alice").unwrap();
    assert_eq!(game.balance("Alice").unwrap(), 1550);
    assert!(events.contains(&GameEvent::CardDrawn {
        player: "Alice".to_string(),
        deck: DeckKind::Chance,
        text: ChanceCard::BankDividend.text().to_string(),
    }));
}

#[test]
fn test_repairs_charge_per_structure() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Alice", &[ANGEL, EUSTON, PENTONVILLE]);
    game.board[ANGEL].street_mut().unwrap().houses = 2;
    game.board[EUSTON].street_mut().unwrap().houses = 2;
    game.board[PENTONVILLE].street_mut().unwrap().hotel = true;
    game.players[0].position = 4;
    game.chance.stack(ChanceCard::GeneralRepairs);
    game.dice.load([(1, 2)]);

    game.play_turn("Alice").unwrap();
    assert_eq!(game.balance("Alice").unwrap(), 1500 - 4 * 25 - 100);
}

// ==================== Jail ====================

#[test]
fn test_get_out_of_jail_free_flow() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].auto_purchase = false;
    game.chance.stack(ChanceCard::GetOutOfJailFree);
    game.dice.load([(3, 4)]);
    game.play_turn("Alice").unwrap();
    assert!(game.player("Alice").unwrap().has_get_out_of_jail_free);

    // Straight to jail from the jail space
    game.players[0].position = 24;
    game.dice.load([(2, 4)]);
    game.play_turn("Alice").unwrap();
    assert!(game.player("Alice").unwrap().in_jail);

    game.dice.load([(1, 3)]);
    game.play_turn("Alice").unwrap();
    let alice = game.player("Alice").unwrap();
    assert!(!alice.in_jail);
    assert!(!alice.has_get_out_of_jail_free);
    assert_eq!(alice.position, 34);
    assert_eq!(alice.balance, 1500);
}

#[test]
fn test_third_failed_attempt_forces_fine() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].auto_purchase = false;
    game.players[0].send_to_jail(30);
    game.dice.load_flips([false, false, false]);
    game.dice.load([(1, 2), (1, 3), (2, 3)]);

    game.play_turn("Alice").unwrap();
    game.play_turn("Alice").unwrap();
    assert_eq!(game.player("Alice").unwrap().jail_attempts, 2);
    assert!(game.player("Alice").unwrap().in_jail);

    let events = game.play_turn("Alice").unwrap();
    let alice = game.player("Alice").unwrap();
    assert!(!alice.in_jail);
    assert_eq!(alice.jail_attempts, 0);
    assert_eq!(alice.position, 35);
    assert_eq!(alice.balance, 1450);
    assert!(events.contains(&GameEvent::LeftJail {
        player: "Alice".to_string(),
        release: JailRelease::ForcedFine,
        paid: 50,
    }));
}

#[test]
fn test_jail_doubles_move_and_roll_again() {
    let mut game = game(&["Alice", "Bob"]);
    game.players[0].auto_purchase = false;
    game.players[0].send_to_jail(30);
    game.dice.load_flips([false]);
    game.dice.load([(2, 2), (1, 2)]);

    game.play_turn("Alice").unwrap();
    let alice = game.player("Alice").unwrap();
    assert!(!alice.in_jail);
    assert_eq!(alice.position, 37);
    assert_eq!(alice.balance, 1500);
}

// ==================== Rent and development ====================

#[test]
fn test_both_utilities_rent_in_bounds() {
    for seed in 0..40 {
        let config = GameConfig {
            auto_develop: false,
            ..GameConfig::seeded(seed)
        };
        let mut game = Game::start(&["Alice", "Bob"], config).unwrap();
        give(&mut game, "Bob", &[ELECTRIC_COMPANY, WATER_WORKS]);
        game.players[0].position = PENTONVILLE;
        game.dice.load([(1, 2)]);

        game.play_turn("Alice").unwrap();
        let rent = game.balance("Bob").unwrap() - 1500;
        assert!((20..=120).contains(&rent), "rent {} out of range", rent);
        assert_eq!(rent % 10, 0);
        assert_eq!(game.balance("Alice").unwrap(), 1500 - rent);
    }
}

#[test]
fn test_develop_colorgroup_unaffordable() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Alice", &[ANGEL, EUSTON, PENTONVILLE]);
    game.players[0].balance = 40;

    assert_eq!(game.develop_colorgroup("Alice", Color::LightBlue).unwrap(), 0);
    for index in [ANGEL, EUSTON, PENTONVILLE] {
        assert_eq!(game.board[index].street().unwrap().houses, 0);
    }
}

#[test]
fn test_develop_colorgroup_stops_mid_group() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Alice", &[ANGEL, EUSTON, PENTONVILLE]);
    game.players[0].balance = 120;

    assert_eq!(game.develop_colorgroup("Alice", Color::LightBlue).unwrap(), 2);
    let houses: Vec<u8> = [ANGEL, EUSTON, PENTONVILLE]
        .iter()
        .map(|i| game.board[*i].street().unwrap().houses)
        .collect();
    assert_eq!(houses, vec![1, 1, 0]);
    assert_eq!(game.balance("Alice").unwrap(), 20);
    assert_even_build(&game.board);
}

#[test]
fn test_develop_colorgroup_to_hotels() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Alice", &[ANGEL, EUSTON, PENTONVILLE]);

    assert_eq!(game.develop_colorgroup("Alice", Color::LightBlue).unwrap(), 15);
    assert!(game.board.group_fully_developed(Color::LightBlue));
    assert_eq!(game.balance("Alice").unwrap(), 1500 - 15 * 50);
    assert_eq!(game.develop_colorgroup("Alice", Color::LightBlue).unwrap(), 0);
}

#[test]
fn test_mortgaged_sibling_blocks_building() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Alice", &[ANGEL, EUSTON, PENTONVILLE]);
    game.mortgage("Alice", EUSTON).unwrap();

    assert!(matches!(
        game.build("Alice", ANGEL),
        Err(GameError::GroupMortgaged(_))
    ));
    assert_eq!(game.develop_colorgroup("Alice", Color::LightBlue).unwrap(), 0);

    game.unmortgage("Alice", EUSTON).unwrap();
    game.build("Alice", ANGEL).unwrap();
    assert!(matches!(
        game.build("Alice", ANGEL),
        Err(GameError::UnevenBuild(_))
    ));
    assert!(matches!(
        game.sell_property("Alice", PENTONVILLE),
        Err(GameError::GroupDeveloped(_))
    ));
}

#[test]
fn test_auto_develop_at_turn_start() {
    let config = GameConfig::seeded(5);
    let mut game = Game::start(&["Alice", "Bob"], config).unwrap();
    give(&mut game, "Alice", &[OLD_KENT_ROAD, 3]);
    game.players[0].auto_purchase = false;
    game.dice.load([(2, 3)]);

    game.play_turn("Alice").unwrap();
    let assets = game.assets("Alice").unwrap();
    assert!(assets.iter().all(|a| a.hotel));
    assert_eq!(game.balance("Alice").unwrap(), 1500 - 10 * 50);
    assert_eq!(game.owned_colorgroups("Alice").unwrap(), vec![Color::Brown]);
}

// ==================== Full games ====================

/// Play a seeded game until someone is eliminated or the turn cap is hit
fn play_out(seed: u64, max_turns: u32) -> Game {
    let mut game =
        Game::start(&["Alice", "Bob", "Carol"], GameConfig::seeded(seed)).unwrap();
    if seed % 2 == 1 {
        game.players[1].strategy = Strategy::Random;
    }

    let mut current = game.pick_starter();
    for _ in 0..max_turns {
        match game.play_turn(&current) {
            Ok(_) => {}
            Err(GameError::GameOver { .. }) => break,
            Err(e) => panic!("unexpected error: {}", e),
        }
        assert_solvent(&game);
        assert_even_build(&game.board);
        current = game.pick_next_player(&current).unwrap();
    }
    game
}

#[test]
fn test_seeded_games_hold_invariants() {
    for seed in 0..12 {
        let game = play_out(seed, 400);
        assert!(game.turn > 0);
        for player in &game.players {
            for index in &player.properties {
                assert_eq!(game.board[*index].owner, Some(player.id));
            }
        }
    }
}

#[test]
fn test_seeded_games_replay_identically() {
    let first = play_out(21, 150);
    let second = play_out(21, 150);
    assert_eq!(first.events(), second.events());
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn test_finished_game_reports_loser() {
    let game = (0..40)
        .map(|seed| play_out(seed, 2000))
        .find(Game::is_finished)
        .expect("some seeded game should end in bankruptcy");

    let loser = game.loser().unwrap().to_string();
    assert!(game.player(&loser).unwrap().eliminated);
    assert!(matches!(
        game.events().last(),
        Some(GameEvent::PlayerEliminated { .. })
    ));
    assert_eq!(game.snapshot().phase, GamePhase::Finished { loser });
}

#[test]
fn test_snapshot_serializes() {
    let mut game = game(&["Alice", "Bob"]);
    give(&mut game, "Bob", &[MAYFAIR]);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["players"][1]["assets"][0]["name"], "Mayfair");
    assert_eq!(json["players"][0]["balance"], 1500);
    assert_eq!(json["phase"], "InProgress");
}
