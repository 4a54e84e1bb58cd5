use thiserror::Error;

use crate::domain::card::Card;
use crate::engine::RandomSource;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Колода пуста")]
    Exhausted,
}

/// Источник карт для стола.
///
/// `reset` – новая случайная перестановка всех 52 карт,
/// `deal` – снять одну карту (ошибка, если колода кончилась).
pub trait CardSupply {
    fn reset(&mut self);
    fn deal(&mut self) -> Result<Card, DeckError>;
    fn remaining(&self) -> usize;
}

/// Колода поверх внешнего RNG. Сама колода перемешивание не реализует –
/// порядок задаёт `RandomSource`.
#[derive(Clone, Debug)]
pub struct Deck<R> {
    cards: Vec<Card>,
    rng: R,
}

impl<R: RandomSource> Deck<R> {
    /// Новая, уже перемешанная колода.
    pub fn new(rng: R) -> Self {
        let mut deck = Self {
            cards: Vec::new(),
            rng,
        };
        deck.reset();
        deck
    }

    /// Оставшиеся карты (верх колоды – последний элемент).
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl<R: RandomSource> CardSupply for Deck<R> {
    fn reset(&mut self) {
        self.cards = Card::universe();
        self.rng.shuffle(&mut self.cards);
    }

    fn deal(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}
