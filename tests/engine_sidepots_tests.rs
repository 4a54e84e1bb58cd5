//! Side pots / settlement / выплата банков.
//!
//! Здесь мы проверяем:
//! - слои банка по вкладам (в том числе со сфолдившими);
//! - накопление банков между улицами;
//! - выплату по группам рук и нечётные фишки.

use poker_table::api::Command;
use poker_table::domain::{Chips, Deck, PlayerId, Street, TableConfig};
use poker_table::engine::{
    apply, compute_side_pots, Contribution, EngineError, Pot, TableState,
};
use poker_table::infra::rng::DeterministicRng;

type Table = TableState<Deck<DeterministicRng>>;

fn table_with_stacks(players: &[(PlayerId, u64)]) -> Table {
    let mut t = TableState::new(
        TableConfig::default(),
        Deck::new(DeterministicRng::from_seed(9)),
    );
    for &(id, stack) in players {
        apply(
            &mut t,
            Command::AddPlayer {
                player_id: id,
                stack: Chips(stack),
            },
        )
        .unwrap();
    }
    t
}

fn wager(t: &mut Table, id: PlayerId, amount: u64) {
    apply(
        t,
        Command::Wager {
            player_id: id,
            amount: Chips(amount),
        },
    )
    .unwrap();
}

/// Все, кто может ходить, делают check до шоудауна.
fn check_down(t: &mut Table) {
    while t.street() != Street::Showdown {
        while let Some(id) = t.to_act() {
            apply(t, Command::Check { player_id: id }).unwrap();
        }
        let next = match t.street() {
            Street::Preflop => Command::StartFlop,
            Street::Flop => Command::StartTurn,
            Street::Turn => Command::StartRiver,
            _ => Command::StartShowdown,
        };
        apply(t, next).unwrap();
    }
}

fn pot_info(p: &Pot) -> (u64, Vec<PlayerId>) {
    (p.total.0, p.eligible.iter().copied().collect())
}

/// 1: олл-ин 10, 2 и 3 ставят по 30 (кнопка 1, SB 2, BB 3).
fn ten_thirty_thirty() -> Table {
    let mut t = table_with_stacks(&[(1, 10), (2, 100), (3, 100)]);
    apply(&mut t, Command::StartHand).unwrap();
    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    wager(&mut t, 1, 10);
    wager(&mut t, 2, 30);
    wager(&mut t, 3, 30);
    t
}

//
// ====================== LAYERS ======================
//

#[test]
fn ten_thirty_thirty_via_engine() {
    let mut t = ten_thirty_thirty();
    assert!(t.is_action_complete());
    apply(&mut t, Command::StartFlop).unwrap();

    let pots: Vec<_> = t.pots().iter().map(pot_info).collect();
    assert_eq!(pots, vec![(30, vec![1, 2, 3]), (40, vec![2, 3])]);
    assert!(t.seats().iter().all(|s| s.total_bet.is_zero()));
    assert_eq!(t.total_chips(), Chips(210));
}

#[test]
fn four_all_ins_make_three_layers() {
    let pots = compute_side_pots(&[
        Contribution { player_id: 1, amount: Chips(25), eligible: true },
        Contribution { player_id: 2, amount: Chips(75), eligible: true },
        Contribution { player_id: 3, amount: Chips(150), eligible: true },
        Contribution { player_id: 4, amount: Chips(150), eligible: true },
    ]);
    let info: Vec<_> = pots.iter().map(pot_info).collect();
    assert_eq!(
        info,
        vec![
            (100, vec![1, 2, 3, 4]),
            (150, vec![2, 3, 4]),
            (150, vec![3, 4]),
        ]
    );
}

#[test]
fn folded_player_funds_pot_but_cannot_win() {
    let mut t = table_with_stacks(&[(1, 100), (2, 100), (3, 100)]);
    apply(&mut t, Command::StartHand).unwrap();
    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    wager(&mut t, 1, 2);
    wager(&mut t, 2, 2);
    apply(&mut t, Command::Check { player_id: 3 }).unwrap();
    apply(&mut t, Command::StartFlop).unwrap();
    assert_eq!(pot_info(&t.pots()[0]), (6, vec![1, 2, 3]));

    // Флоп: 2 ставит 10, 3 сбрасывает, 1 отвечает.
    wager(&mut t, 2, 10);
    apply(&mut t, Command::Fold { player_id: 3 }).unwrap();
    wager(&mut t, 1, 10);
    apply(&mut t, Command::StartTurn).unwrap();

    let pots: Vec<_> = t.pots().iter().map(pot_info).collect();
    assert_eq!(pots, vec![(26, vec![1, 2])]);
}

#[test]
fn flop_all_in_adds_side_pot_to_preflop_pot() {
    // Кнопка 1, SB 2, BB 3; у 3 остаётся 20 после префлопа.
    let mut t = table_with_stacks(&[(1, 100), (2, 100), (3, 30)]);
    apply(&mut t, Command::StartHand).unwrap();
    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    wager(&mut t, 1, 10);
    wager(&mut t, 2, 10);
    wager(&mut t, 3, 10);
    apply(&mut t, Command::StartFlop).unwrap();
    assert_eq!(pot_info(&t.pots()[0]), (30, vec![1, 2, 3]));

    // Флоп: 2 ставит 50, 3 в олл-ин на 20, 1 уравнивает.
    wager(&mut t, 2, 50);
    wager(&mut t, 3, 20);
    wager(&mut t, 1, 50);
    apply(&mut t, Command::StartTurn).unwrap();

    let pots: Vec<_> = t.pots().iter().map(pot_info).collect();
    assert_eq!(pots, vec![(90, vec![1, 2, 3]), (60, vec![1, 2])]);

    // Тёрн: 1 сбрасывает, его место во всех банках пропадает.
    wager(&mut t, 2, 10);
    apply(&mut t, Command::Fold { player_id: 1 }).unwrap();
    apply(&mut t, Command::StartRiver).unwrap();

    let pots: Vec<_> = t.pots().iter().map(pot_info).collect();
    assert_eq!(pots, vec![(90, vec![2, 3]), (70, vec![2])]);
    assert_eq!(t.total_chips(), Chips(230));
}

#[test]
fn settle_pots_refuses_open_street() {
    let mut t = ten_thirty_thirty();
    assert_eq!(t.settle_pots(), Err(EngineError::OutstandingWager));
    assert_eq!(t.pots().len(), 1);
    assert!(t.pots()[0].is_empty());
}

//
// ====================== AWARD ======================
//

#[test]
fn short_stack_wins_main_pot_only() {
    let mut t = ten_thirty_thirty();
    check_down(&mut t);
    assert_eq!(t.board().len(), 5);

    let paid = t.award_pots(&[vec![1], vec![2, 3]]).unwrap();
    assert_eq!(paid, vec![(1, Chips(30)), (2, Chips(20)), (3, Chips(20))]);
    assert_eq!(t.seat(1).unwrap().stack, Chips(30));
    assert_eq!(t.seat(2).unwrap().stack, Chips(90));
    assert_eq!(t.seat(3).unwrap().stack, Chips(90));
    assert!(t.pots().is_empty());
    assert_eq!(t.total_chips(), Chips(210));
}

#[test]
fn award_only_at_showdown() {
    let mut t = ten_thirty_thirty();
    apply(&mut t, Command::StartFlop).unwrap();
    assert_eq!(
        t.award_pots(&[vec![1]]),
        Err(EngineError::IllegalAction)
    );
}

#[test]
fn split_pot_odd_chip_goes_left_of_button() {
    // Кнопка 1, SB 2, BB 3; у 1 и 2 одинаковые руки.
    let mut t = table_with_stacks(&[(1, 100), (2, 100), (3, 100)]);
    apply(&mut t, Command::StartHand).unwrap();
    apply(&mut t, Command::PostSmall { player_id: 2 }).unwrap();
    apply(&mut t, Command::PostBig { player_id: 3 }).unwrap();
    wager(&mut t, 1, 2);
    apply(&mut t, Command::Fold { player_id: 2 }).unwrap();
    apply(&mut t, Command::Check { player_id: 3 }).unwrap();
    check_down(&mut t);

    // Банк 5: 1 + 2 + 2; делят 1 и 3, лишняя фишка – 3 (ближе к кнопке слева).
    let paid = t.award_pots(&[vec![1, 3]]).unwrap();
    assert_eq!(paid, vec![(1, Chips(2)), (3, Chips(3))]);
    assert_eq!(t.total_chips(), Chips(300));
}

#[test]
fn missing_winner_leaves_stacks_untouched() {
    let mut t = ten_thirty_thirty();
    check_down(&mut t);
    assert_eq!(
        t.award_pots(&[vec![1]]),
        Err(EngineError::NoEligibleWinner(1))
    );
    assert_eq!(t.seat(1).unwrap().stack, Chips(0));
    assert_eq!(t.pots().len(), 2);
}
