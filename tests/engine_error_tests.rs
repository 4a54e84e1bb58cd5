//! Отклонённая команда не меняет стол.
//!
//! Снимок стола (DTO + длина истории) до и после каждой ошибки
//! должен совпадать.

use poker_table::api::{build_table_view, Command, TableViewDto};
use poker_table::domain::{Chips, Deck, PlayerId, Street, TableConfig};
use poker_table::engine::{apply, EngineError, TableState};
use poker_table::infra::rng::DeterministicRng;

type Table = TableState<Deck<DeterministicRng>>;

fn table_with(ids: &[PlayerId]) -> Table {
    let mut t = TableState::new(
        TableConfig::default(),
        Deck::new(DeterministicRng::from_seed(21)),
    );
    for &id in ids {
        apply(
            &mut t,
            Command::AddPlayer {
                player_id: id,
                stack: Chips(100),
            },
        )
        .unwrap();
    }
    t
}

fn snapshot(t: &Table) -> (TableViewDto, usize, usize) {
    (
        build_table_view(t, |_| true),
        t.history().events.len(),
        poker_table::domain::CardSupply::remaining(t.supply()),
    )
}

/// Применить команду, ожидая ошибку, и убедиться, что стол не изменился.
fn assert_rejected(t: &mut Table, cmd: Command, expected: EngineError) {
    let before = snapshot(t);
    assert_eq!(apply(t, cmd), Err(expected));
    assert_eq!(snapshot(t), before, "стол изменился после {cmd:?}");
}

fn preflop_with_blinds() -> Table {
    let mut t = table_with(&[1, 2, 3]);
    apply(&mut t, Command::StartHand).unwrap();
    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    t
}

#[test]
fn duplicate_add_player_changes_nothing() {
    let mut t = table_with(&[1, 2]);
    assert_rejected(
        &mut t,
        Command::AddPlayer {
            player_id: 2,
            stack: Chips(5),
        },
        EngineError::PlayerAlreadySeated(2),
    );
}

#[test]
fn under_bet_wager_changes_nothing() {
    let mut t = preflop_with_blinds();
    assert_rejected(
        &mut t,
        Command::Wager {
            player_id: 1,
            amount: Chips(1),
        },
        EngineError::UnderCall {
            amount: Chips(1),
            active: Chips(2),
        },
    );
}

#[test]
fn wager_below_own_bet_changes_nothing() {
    let mut t = preflop_with_blinds();
    apply(&mut t, Command::Wager { player_id: 1, amount: Chips(2) }).unwrap();
    apply(&mut t, Command::Wager { player_id: 2, amount: Chips(2) }).unwrap();
    assert_rejected(
        &mut t,
        Command::Wager {
            player_id: 3,
            amount: Chips(1),
        },
        EngineError::WagerBelowCurrentBet {
            amount: Chips(1),
            current: Chips(2),
        },
    );
}

#[test]
fn remove_player_mid_hand_changes_nothing() {
    let mut t = preflop_with_blinds();
    assert_rejected(
        &mut t,
        Command::RemovePlayer { player_id: 1 },
        EngineError::HandInProgress,
    );
}

#[test]
fn street_commands_out_of_order_change_nothing() {
    let mut t = preflop_with_blinds();
    assert_rejected(&mut t, Command::StartFlop, EngineError::ActionNotComplete);
    assert_rejected(
        &mut t,
        Command::StartShowdown,
        EngineError::InvalidStreetTransition {
            from: Street::Preflop,
            to: Street::Showdown,
        },
    );
}

#[test]
fn blind_and_turn_errors_change_nothing() {
    let mut t = table_with(&[1, 2, 3]);
    apply(&mut t, Command::StartHand).unwrap();

    assert_rejected(
        &mut t,
        Command::PostBig { player_id: 2 },
        EngineError::NotBlindSeat(2),
    );
    assert_rejected(
        &mut t,
        Command::Wager {
            player_id: 1,
            amount: Chips(2),
        },
        EngineError::BlindsNotPosted,
    );

    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    assert_rejected(
        &mut t,
        Command::Check { player_id: 2 },
        EngineError::NotPlayersTurn(2),
    );
    assert_rejected(
        &mut t,
        Command::Fold { player_id: 9 },
        EngineError::PlayerNotSeated(9),
    );
}

#[test]
fn start_hand_alone_changes_nothing() {
    let mut t = table_with(&[1]);
    assert_rejected(&mut t, Command::StartHand, EngineError::NotEnoughPlayers);
}

#[test]
fn invariant_errors_are_fatal() {
    assert!(!EngineError::CannotCheck.is_fatal());
    assert!(EngineError::from(poker_table::engine::InvariantError::UnassignableBlinds).is_fatal());
}
