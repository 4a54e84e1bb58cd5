use log::{debug, error, info, warn};

use crate::api::commands::Command;
use crate::domain::chips::Chips;
use crate::domain::deck::{CardSupply, DeckError};
use crate::domain::street::Street;
use crate::domain::table::MAX_SEATS;
use crate::domain::{PlayerId, SeatState};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::{
    assign_blinds_and_button, count_sitting_in, first_postflop_actor, first_preflop_actor,
    next_can_act, next_sitting_in, shift_index, sit_out_busted,
};
use crate::engine::pot::Pot;
use crate::engine::table_state::{TableState, MIN_PLAYERS};
use crate::engine::validation::{validate_action, validate_actor};

/// Карманных карт на игрока.
const HOLE_CARDS: usize = 2;

/// Применить команду к столу.
///
/// Любая ошибка оставляет стол ровно в том состоянии, в каком он был
/// до команды.
pub fn apply<S: CardSupply>(table: &mut TableState<S>, command: Command) -> Result<(), EngineError> {
    debug!("Команда: {command:?}");

    let result = match command {
        Command::AddPlayer { player_id, stack } => add_player(table, player_id, stack),
        Command::RemovePlayer { player_id } => remove_player(table, player_id),
        Command::SitIn { player_id } => sit_in(table, player_id),
        Command::SitOut { player_id } => sit_out(table, player_id),
        Command::StartHand => start_hand(table),
        Command::StartFlop => advance_street(table, Street::Flop),
        Command::StartTurn => advance_street(table, Street::Turn),
        Command::StartRiver => advance_street(table, Street::River),
        Command::StartShowdown => advance_street(table, Street::Showdown),
        Command::EndHand => end_hand(table),
        Command::PostSmall { player_id } => {
            post_blind(table, PlayerAction::new(player_id, PlayerActionKind::PostSmall))
        }
        Command::PostBig { player_id } => {
            post_blind(table, PlayerAction::new(player_id, PlayerActionKind::PostBig))
        }
        Command::Check { player_id } => {
            apply_action(table, PlayerAction::new(player_id, PlayerActionKind::Check))
        }
        Command::Fold { player_id } => {
            apply_action(table, PlayerAction::new(player_id, PlayerActionKind::Fold))
        }
        Command::Wager { player_id, amount } => apply_action(
            table,
            PlayerAction::new(player_id, PlayerActionKind::Wager(amount)),
        ),
    };

    match &result {
        Ok(()) => {}
        Err(err) if err.is_fatal() => error!("Команда {command:?} сломала инвариант: {err}"),
        Err(err) => match command.player_id() {
            Some(id) => warn!("Команда игрока {id} отклонена: {err} ({command:?})"),
            None => warn!("Команда {command:?} отклонена: {err}"),
        },
    }
    result
}

// ---------- игроки ----------

fn ensure_waiting<S>(table: &TableState<S>) -> Result<(), EngineError> {
    if table.betting.street != Street::Waiting {
        return Err(EngineError::HandInProgress);
    }
    Ok(())
}

fn add_player<S: CardSupply>(
    table: &mut TableState<S>,
    player_id: PlayerId,
    stack: Chips,
) -> Result<(), EngineError> {
    ensure_waiting(table)?;
    if table.is_seated(player_id) {
        return Err(EngineError::PlayerAlreadySeated(player_id));
    }
    // Конфиг, собранный в коде, мог обойти validate().
    let max = table.config.max_seats.min(MAX_SEATS);
    if table.seats.len() >= max as usize {
        return Err(EngineError::TableFull(max));
    }

    table.index.insert(player_id, table.seats.len());
    table.seats.push(SeatState::new(player_id, stack));
    info!("Игрок {player_id} сел за стол со стеком {stack}");
    Ok(())
}

fn remove_player<S: CardSupply>(
    table: &mut TableState<S>,
    player_id: PlayerId,
) -> Result<(), EngineError> {
    ensure_waiting(table)?;
    let idx = table.seat_index(player_id)?;

    let seat = table.seats.remove(idx);
    table.positions.shift_after_removal(idx);
    table.betting.to_act = shift_index(table.betting.to_act, idx);
    table.rebuild_index();
    info!("Игрок {player_id} ушёл из-за стола со стеком {}", seat.stack);
    Ok(())
}

fn sit_in<S: CardSupply>(table: &mut TableState<S>, player_id: PlayerId) -> Result<(), EngineError> {
    ensure_waiting(table)?;
    let idx = table.seat_index(player_id)?;
    let seat = &mut table.seats[idx];
    if seat.sitting_in {
        return Err(EngineError::AlreadySittingIn(player_id));
    }
    seat.sitting_in = true;
    Ok(())
}

fn sit_out<S: CardSupply>(table: &mut TableState<S>, player_id: PlayerId) -> Result<(), EngineError> {
    ensure_waiting(table)?;
    let idx = table.seat_index(player_id)?;
    let seat = &mut table.seats[idx];
    if !seat.sitting_in {
        return Err(EngineError::AlreadySittingOut(player_id));
    }
    seat.sitting_in = false;
    table.positions.nullify(idx);
    Ok(())
}

// ---------- улицы ----------

fn ensure_transition(from: Street, to: Street) -> Result<(), EngineError> {
    if from.next() != to {
        return Err(EngineError::InvalidStreetTransition { from, to });
    }
    Ok(())
}

/// Старт новой раздачи:
/// - места без фишек переводит в sit out;
/// - назначает кнопку и блайнды;
/// - сбрасывает места, борд и банки;
/// - раздаёт по две карманные карты, начиная слева от кнопки;
/// - ставит первого ходящего (ход откроется после блайндов).
fn start_hand<S: CardSupply>(table: &mut TableState<S>) -> Result<(), EngineError> {
    ensure_waiting(table)?;
    table.check_ring()?;

    // Всё считаем на копии мест: при ошибке стол не меняется.
    let mut seats = table.seats.clone();
    let mut prev = table.positions;
    let busted = sit_out_busted(&mut seats, &mut prev);
    if count_sitting_in(&seats) < MIN_PLAYERS {
        return Err(EngineError::NotEnoughPlayers);
    }

    let positions = assign_blinds_and_button(&seats, &prev)?;
    let deal_order = dealing_order(&seats, positions.button)?;

    table.supply.reset();
    let needed = deal_order.len() * HOLE_CARDS;
    if table.supply.remaining() < needed {
        return Err(DeckError::Exhausted.into());
    }
    let mut dealt = vec![Vec::with_capacity(HOLE_CARDS); deal_order.len()];
    for _ in 0..HOLE_CARDS {
        for hand in dealt.iter_mut() {
            hand.push(table.supply.deal()?);
        }
    }

    if !table.pots.iter().all(Pot::is_empty) {
        warn!("Невыплаченные банки прошлой раздачи сброшены");
    }

    // Дальше только изменения.
    table.seats = seats;
    for id in busted {
        info!("Игрок {id} без фишек пропускает раздачу");
    }
    for seat in &mut table.seats {
        seat.reset_all();
    }
    table.positions = positions;
    table.board.clear();
    table.pots = vec![Pot::new()];
    table.betting.reset_for_street(Street::Preflop);
    table.betting.to_act = first_preflop_actor(&table.seats, &positions);
    table.hands_played += 1;

    let hand_number = table.hands_played;
    table.history.start(hand_number);
    let (button, small_blind, big_blind) =
        (table.button(), table.small_blind(), table.big_blind());
    table.history.push(HandEventKind::PositionsAssigned {
        button,
        small_blind,
        big_blind,
    });
    for (idx, cards) in deal_order.into_iter().zip(dealt) {
        let seat = &mut table.seats[idx];
        seat.hole_cards = cards.clone();
        table.history.push(HandEventKind::HoleCardsDealt {
            player_id: seat.player_id,
            cards,
        });
    }

    info!("Раздача #{hand_number} началась: кнопка {button:?}, SB {small_blind:?}, BB {big_blind:?}");
    Ok(())
}

/// Сидящие в игре места по кругу, начиная слева от кнопки.
fn dealing_order(seats: &[SeatState], button: Option<usize>) -> Result<Vec<usize>, EngineError> {
    let n = seats.len();
    let start = match button {
        Some(b) => next_sitting_in(seats, b)?,
        None => 0,
    };
    Ok((0..n)
        .map(|step| (start + step) % n)
        .filter(|&idx| seats[idx].sitting_in)
        .collect())
}

/// Переход на следующую улицу (включая шоудаун).
fn advance_street<S: CardSupply>(table: &mut TableState<S>, target: Street) -> Result<(), EngineError> {
    ensure_transition(table.betting.street, target)?;
    if !table.is_action_complete() {
        return Err(EngineError::ActionNotComplete);
    }
    let cards = target.community_cards();
    if table.supply.remaining() < cards {
        return Err(DeckError::Exhausted.into());
    }

    for seat in &mut table.seats {
        seat.reset_current_bet();
    }
    table.collect_into_pots();

    let mut opened = Vec::with_capacity(cards);
    for _ in 0..cards {
        opened.push(table.supply.deal()?);
    }
    table.board.extend_from_slice(&opened);

    table.betting.reset_for_street(target);
    table.betting.to_act = if target == Street::Showdown {
        None
    } else {
        first_postflop_actor(&table.seats, &table.positions)
    };

    table.history.push(HandEventKind::StreetChanged { street: target });
    if !opened.is_empty() {
        table.history.push(HandEventKind::BoardDealt {
            street: target,
            cards: opened,
        });
    }
    info!("Улица {target}, борд {:?}", table.board);
    Ok(())
}

fn end_hand<S: CardSupply>(table: &mut TableState<S>) -> Result<(), EngineError> {
    ensure_transition(table.betting.street, Street::Waiting)?;

    if !table.pots.iter().all(Pot::is_empty) {
        warn!("Раздача завершена без выплаты банков");
    }
    for seat in &mut table.seats {
        seat.reset_all();
    }
    table.board.clear();
    table.pots.clear();
    table.betting.reset_for_street(Street::Waiting);

    let hand_number = table.hands_played;
    table
        .history
        .push(HandEventKind::HandFinished { hand_number });
    info!("Раздача #{hand_number} завершена");
    Ok(())
}

// ---------- действия игроков ----------

/// Общие условия для любого действия игрока: идёт торговля, блайнды
/// заданы, игрок сидит за столом, в раздаче и не в олл-ине.
fn common_preconditions<S: CardSupply>(
    table: &TableState<S>,
    player_id: PlayerId,
) -> Result<usize, EngineError> {
    let street = table.betting.street;
    if !street.is_betting() {
        return Err(EngineError::NoBettingRound(street));
    }
    if table.config.stakes.blinds().is_none() {
        return Err(EngineError::BlindsNotConfigured);
    }
    let idx = table.seat_index(player_id)?;
    validate_actor(&table.seats[idx], &table.betting)?;
    Ok(idx)
}

fn post_blind<S: CardSupply>(table: &mut TableState<S>, action: PlayerAction) -> Result<(), EngineError> {
    let idx = common_preconditions(table, action.player_id)?;
    let (small, big) = table
        .config
        .stakes
        .blinds()
        .ok_or(EngineError::BlindsNotConfigured)?;
    if table.betting.street != Street::Preflop {
        return Err(EngineError::IllegalAction);
    }

    let (expected, posted, amount) = match action.kind {
        PlayerActionKind::PostSmall => (
            table.positions.small_blind,
            table.betting.small_blind_posted,
            small,
        ),
        PlayerActionKind::PostBig => (
            table.positions.big_blind,
            table.betting.big_blind_posted,
            big,
        ),
        _ => return Err(EngineError::IllegalAction),
    };
    if expected != Some(idx) {
        return Err(EngineError::NotBlindSeat(action.player_id));
    }
    if posted {
        return Err(EngineError::BlindAlreadyPosted);
    }

    // Короткий стек ставит сколько есть.
    let seat = &mut table.seats[idx];
    let paid = amount.min(seat.stack);
    seat.blind(paid)?;
    let (current_bet, all_in) = (seat.current_bet, seat.all_in);

    table.betting.raise_to(current_bet);
    match action.kind {
        PlayerActionKind::PostSmall => table.betting.small_blind_posted = true,
        _ => table.betting.big_blind_posted = true,
    }

    // Блайнд мог уйти в олл-ин будучи первым ходящим (heads-up).
    let to_act_blocked = table
        .betting
        .to_act
        .and_then(|i| table.seats.get(i))
        .map_or(false, |s| !s.can_act());
    if to_act_blocked {
        let from = table.betting.to_act.unwrap_or(idx);
        table.betting.to_act = if table.is_action_complete() {
            None
        } else {
            next_can_act(&table.seats, from).ok()
        };
    }

    table.history.push(HandEventKind::BlindPosted {
        player_id: action.player_id,
        amount: paid,
        all_in,
    });
    debug!("Игрок {} поставил блайнд {paid}", action.player_id);
    Ok(())
}

/// Check / Fold / Wager.
fn apply_action<S: CardSupply>(table: &mut TableState<S>, action: PlayerAction) -> Result<(), EngineError> {
    let idx = common_preconditions(table, action.player_id)?;
    if table.betting.street == Street::Preflop && !table.betting.blinds_posted() {
        return Err(EngineError::BlindsNotPosted);
    }
    if table.betting.to_act != Some(idx) {
        return Err(EngineError::NotPlayersTurn(action.player_id));
    }
    let delta = validate_action(&table.seats[idx], &action.kind, &table.betting)?;

    let seat = &mut table.seats[idx];
    match action.kind {
        PlayerActionKind::Check => seat.act(),
        PlayerActionKind::Fold => seat.fold(),
        PlayerActionKind::Wager(_) => seat.wager(delta)?,
        PlayerActionKind::PostSmall | PlayerActionKind::PostBig => {
            return Err(EngineError::IllegalAction)
        }
    }
    let new_stack = seat.stack;
    let current_bet = seat.current_bet;
    table.betting.raise_to(current_bet);

    table.betting.to_act = if table.is_action_complete() {
        None
    } else {
        next_can_act(&table.seats, idx).ok()
    };

    table.history.push(HandEventKind::PlayerActed {
        player_id: action.player_id,
        action: action.kind,
        new_stack,
        active_bet: table.betting.active_bet,
    });
    debug!(
        "Игрок {} -> {:?}, ход у {:?}",
        action.player_id,
        action.kind,
        table.to_act()
    );
    Ok(())
}
