use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, SeatState};
use crate::engine::errors::{EngineError, InvariantError};

/// Heads-up: ровно два игрока в игре.
const HEADS_UP: usize = 2;

/// Кнопка и блайнды как индексы в кольце мест.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Positions {
    pub button: Option<usize>,
    pub small_blind: Option<usize>,
    pub big_blind: Option<usize>,
}

impl Positions {
    pub fn is_unassigned(&self) -> bool {
        self.button.is_none() && self.small_blind.is_none() && self.big_blind.is_none()
    }

    /// Снять игрока с кнопки/блайндов (sit out / уход из-за стола).
    pub fn nullify(&mut self, idx: usize) {
        for slot in [&mut self.button, &mut self.small_blind, &mut self.big_blind] {
            if *slot == Some(idx) {
                *slot = None;
            }
        }
    }

    /// Место `removed` удалено из кольца: его указатели обнуляются,
    /// указатели на места правее сдвигаются на одно влево.
    pub fn shift_after_removal(&mut self, removed: usize) {
        for slot in [&mut self.button, &mut self.small_blind, &mut self.big_blind] {
            *slot = shift_index(*slot, removed);
        }
    }
}

/// Сдвиг индекса после удаления места `removed` (само место даёт None).
pub fn shift_index(idx: Option<usize>, removed: usize) -> Option<usize> {
    match idx {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}

pub fn count_sitting_in(seats: &[SeatState]) -> usize {
    seats.iter().filter(|s| s.sitting_in).count()
}

/// Сколько мест получит карты в следующей раздаче.
pub fn count_dealable(seats: &[SeatState]) -> usize {
    seats
        .iter()
        .filter(|s| s.sitting_in && !s.stack.is_zero())
        .count()
}

/// Места без фишек пропускают раздачу так же, как после sit out:
/// снимаются с кнопки и блайндов. Возвращает их id.
pub fn sit_out_busted(seats: &mut [SeatState], positions: &mut Positions) -> Vec<PlayerId> {
    let mut busted = Vec::new();
    for (idx, seat) in seats.iter_mut().enumerate() {
        if seat.is_busted() {
            seat.sitting_in = false;
            positions.nullify(idx);
            busted.push(seat.player_id);
        }
    }
    busted
}

/// Ближайшее место после `cur` по кругу (сам `cur` не рассматривается),
/// удовлетворяющее `pred`.
pub fn next_seat_if(
    seats: &[SeatState],
    cur: usize,
    pred: impl Fn(&SeatState) -> bool,
) -> Result<usize, EngineError> {
    let n = seats.len();
    if cur >= n {
        return Err(InvariantError::PointerOutOfRange(cur).into());
    }
    (1..n)
        .map(|step| (cur + step) % n)
        .find(|&idx| pred(&seats[idx]))
        .ok_or(EngineError::NoEligibleSeat)
}

pub fn next_sitting_in(seats: &[SeatState], cur: usize) -> Result<usize, EngineError> {
    next_seat_if(seats, cur, |s| s.sitting_in)
}

pub fn next_can_act(seats: &[SeatState], cur: usize) -> Result<usize, EngineError> {
    next_seat_if(seats, cur, SeatState::can_act)
}

pub fn first_sitting_in(seats: &[SeatState]) -> Result<usize, EngineError> {
    seats
        .iter()
        .position(|s| s.sitting_in)
        .ok_or(EngineError::NotEnoughPlayers)
}

/// Первое место, начиная с `start` включительно, которое может ходить.
fn first_can_act_from(seats: &[SeatState], start: usize) -> Option<usize> {
    let n = seats.len();
    (0..n)
        .map(|step| (start + step) % n)
        .find(|&idx| seats[idx].can_act())
}

/// Кнопка и блайнды для новой раздачи, исходя из позиций прошлой.
///
/// Указатели в `prev` всегда смотрят на сидящих в игре (sit out и уход
/// из-за стола их обнуляют).
pub fn assign_blinds_and_button(
    seats: &[SeatState],
    prev: &Positions,
) -> Result<Positions, EngineError> {
    let n = count_sitting_in(seats);
    if n < HEADS_UP {
        return Err(EngineError::NotEnoughPlayers);
    }

    // Первая раздача за столом.
    if prev.is_unassigned() {
        let button = first_sitting_in(seats)?;
        let (small_blind, big_blind) = if n == HEADS_UP {
            (button, next_sitting_in(seats, button)?)
        } else {
            let sb = next_sitting_in(seats, button)?;
            (sb, next_sitting_in(seats, sb)?)
        };
        return Ok(Positions {
            button: Some(button),
            small_blind: Some(small_blind),
            big_blind: Some(big_blind),
        });
    }

    // Heads-up: блайнды чередуются, кнопка всегда на малом.
    if n == HEADS_UP {
        let (sb, bb) = match (prev.small_blind, prev.big_blind) {
            (Some(prev_sb), Some(prev_bb)) => (prev_bb, prev_sb),
            (None, Some(prev_bb)) => (prev_bb, next_sitting_in(seats, prev_bb)?),
            (Some(prev_sb), None) => (next_sitting_in(seats, prev_sb)?, prev_sb),
            (None, None) => {
                let button = prev.button.ok_or(InvariantError::UnassignableBlinds)?;
                (button, next_sitting_in(seats, button)?)
            }
        };
        return Ok(Positions {
            button: Some(sb),
            small_blind: Some(sb),
            big_blind: Some(bb),
        });
    }

    match (prev.button, prev.small_blind, prev.big_blind) {
        (_, Some(prev_sb), Some(prev_bb)) => Ok(Positions {
            button: Some(prev_sb),
            small_blind: Some(prev_bb),
            big_blind: Some(next_sitting_in(seats, prev_bb)?),
        }),
        // Малый блайнд ушёл: кнопка остаётся пустой.
        (_, None, Some(prev_bb)) => Ok(Positions {
            button: None,
            small_blind: Some(prev_bb),
            big_blind: Some(next_sitting_in(seats, prev_bb)?),
        }),
        (_, Some(prev_sb), None) => {
            let sb = next_sitting_in(seats, prev_sb)?;
            Ok(Positions {
                button: Some(prev_sb),
                small_blind: Some(sb),
                big_blind: Some(next_sitting_in(seats, sb)?),
            })
        }
        (Some(button), None, None) => {
            let sb = next_sitting_in(seats, button)?;
            Ok(Positions {
                button: Some(button),
                small_blind: Some(sb),
                big_blind: Some(next_sitting_in(seats, sb)?),
            })
        }
        (None, None, None) => Err(InvariantError::UnassignableBlinds.into()),
    }
}

/// Первый ход на префлопе: следующий после большого блайнда.
pub fn first_preflop_actor(seats: &[SeatState], positions: &Positions) -> Option<usize> {
    let bb = positions.big_blind?;
    next_can_act(seats, bb).ok()
}

/// Первый ход на постфлопе: следующий после кнопки.
///
/// Без кнопки – первый, кто может ходить, начиная с малого блайнда
/// (или с большого, если и малого нет).
pub fn first_postflop_actor(seats: &[SeatState], positions: &Positions) -> Option<usize> {
    match (positions.button, positions.small_blind, positions.big_blind) {
        (Some(button), _, _) => next_can_act(seats, button).ok(),
        (None, Some(start), _) | (None, None, Some(start)) => first_can_act_from(seats, start),
        (None, None, None) => None,
    }
}
