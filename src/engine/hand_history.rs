use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::street::Street;
use crate::domain::PlayerId;
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_number: u64 },

    /// Кнопка/блайнды.
    PositionsAssigned {
        button: Option<PlayerId>,
        small_blind: Option<PlayerId>,
        big_blind: Option<PlayerId>,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { player_id: PlayerId, cards: Vec<Card> },

    BlindPosted {
        player_id: PlayerId,
        amount: Chips,
        all_in: bool,
    },

    /// Действие игрока.
    PlayerActed {
        player_id: PlayerId,
        action: PlayerActionKind,
        new_stack: Chips,
        active_bet: Chips,
    },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Банки пересчитаны: суммы слоёв после расчёта.
    PotsSettled { totals: Vec<Chips> },

    /// Выплата банка(ов).
    PotAwarded { player_id: PlayerId, amount: Chips },

    /// Раздача завершена.
    HandFinished { hand_number: u64 },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история текущей (или последней) раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub hand_number: u64,
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать историю новой раздачи.
    pub fn start(&mut self, hand_number: u64) {
        self.hand_number = hand_number;
        self.events.clear();
        self.push(HandEventKind::HandStarted { hand_number });
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn last(&self) -> Option<&HandEventKind> {
        self.events.last().map(|e| &e.kind)
    }
}
