use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::{Chips, ChipsError};
use crate::domain::PlayerId;

/// Состояние игрока за столом в рамках текущей раздачи.
///
/// Фишки только перетекают между `stack` и ставками, никогда не создаются
/// и не исчезают. `current_bet <= total_bet` всегда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    pub player_id: PlayerId,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка на текущей улице.
    pub current_bet: Chips,
    /// Всё, что игрок внёс за раздачу (забирается при расчёте банков).
    pub total_bet: Chips,
    pub sitting_in: bool,
    pub all_in: bool,
    pub folded: bool,
    pub has_acted: bool,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
}

impl SeatState {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            player_id,
            stack,
            current_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            sitting_in: true,
            all_in: false,
            folded: false,
            has_acted: false,
            hole_cards: Vec::new(),
        }
    }

    /// Участвует в раздаче: сидит и не сфолдил.
    pub fn is_in_hand(&self) -> bool {
        self.sitting_in && !self.folded
    }

    /// Сидит в игре, но фишек не осталось: в раздачу не попадает.
    pub fn is_busted(&self) -> bool {
        self.sitting_in && self.stack.is_zero()
    }

    /// Может ещё делать ставки.
    pub fn can_act(&self) -> bool {
        self.is_in_hand() && !self.all_in
    }

    /// Check: без движения фишек.
    pub fn act(&mut self) {
        self.has_acted = true;
    }

    /// Fold. Фишки текущей улицы уже учтены в `total_bet`.
    pub fn fold(&mut self) {
        self.has_acted = true;
        self.folded = true;
        self.current_bet = Chips::ZERO;
    }

    /// Блайнд: двигает фишки, но не считается действием –
    /// блайнд ещё может походить на этой улице.
    pub fn blind(&mut self, delta: Chips) -> Result<(), ChipsError> {
        let stack = self.stack.checked_sub(delta)?;
        self.stack = stack;
        self.current_bet += delta;
        self.total_bet += delta;
        if self.stack.is_zero() {
            self.all_in = true;
        }
        Ok(())
    }

    /// Ставка (call/bet/raise) на `delta` фишек сверх текущей ставки.
    pub fn wager(&mut self, delta: Chips) -> Result<(), ChipsError> {
        self.blind(delta)?;
        self.has_acted = true;
        Ok(())
    }

    /// Новая улица.
    pub fn reset_current_bet(&mut self) {
        self.current_bet = Chips::ZERO;
        self.has_acted = false;
    }

    /// Новая раздача.
    pub fn reset_all(&mut self) {
        self.current_bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.all_in = false;
        self.folded = false;
        self.has_acted = false;
        self.hole_cards.clear();
    }
}
