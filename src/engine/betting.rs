use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::street::Street;
use crate::domain::SeatState;
use crate::engine::positions::Positions;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub active_bet: Chips,
    /// Чей ход (индекс в кольце мест).
    pub to_act: Option<usize>,
    pub small_blind_posted: bool,
    pub big_blind_posted: bool,
}

impl BettingState {
    /// Новая улица: ставка и блайнды обнуляются, улица и ход задаются снаружи.
    pub fn reset_for_street(&mut self, street: Street) {
        self.street = street;
        self.active_bet = Chips::ZERO;
        self.to_act = None;
        self.small_blind_posted = false;
        self.big_blind_posted = false;
    }

    pub fn blinds_posted(&self) -> bool {
        self.small_blind_posted && self.big_blind_posted
    }

    /// Поднять целевую ставку, если новая больше.
    pub fn raise_to(&mut self, amount: Chips) {
        if amount > self.active_bet {
            self.active_bet = amount;
        }
    }
}

/// Завершён ли раунд ставок.
///
/// - в раздаче не больше одного игрока – да;
/// - ходить некому (все в олл-ине) – да;
/// - есть ставка: все, кто может ходить, походили и уравняли её;
///   на префлопе при ставке = BB большой блайнд обязан походить сам (опция);
/// - ставки нет: все, кто может ходить, походили.
pub fn is_action_complete(
    seats: &[SeatState],
    betting: &BettingState,
    positions: &Positions,
    big_blind: Option<Chips>,
) -> bool {
    let in_hand = seats.iter().filter(|s| s.is_in_hand()).count();
    if in_hand <= 1 {
        return true;
    }

    let mut can_act = seats.iter().filter(|s| s.can_act()).peekable();
    if can_act.peek().is_none() {
        return true;
    }

    if betting.active_bet.is_zero() {
        return can_act.all(|s| s.has_acted);
    }

    if !can_act.all(|s| s.has_acted && s.current_bet == betting.active_bet) {
        return false;
    }

    if betting.street == Street::Preflop && Some(betting.active_bet) == big_blind {
        let bb_seat = positions.big_blind.and_then(|idx| seats.get(idx));
        if let Some(bb) = bb_seat {
            if bb.can_act() && !bb.has_acted {
                return false;
            }
        }
    }

    true
}
