use crate::domain::{ChipsError, DeckError, PlayerId, Street};
use crate::domain::chips::Chips;

use thiserror::Error;

/// Нарушение внутренних инвариантов. При корректном использовании недостижимо –
/// означает дефект движка, а не ошибку вызывающего.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Невозможно назначить кнопку и блайнды при текущем состоянии стола")]
    UnassignableBlinds,

    #[error("Кольцо мест ({ring}) и индекс игроков ({index}) разошлись")]
    SeatIndexMismatch { ring: usize, index: usize },

    #[error("Указатель на место {0} за пределами кольца")]
    PointerOutOfRange(usize),
}

/// Ошибки движка покера.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок {0} уже сидит за столом")]
    PlayerAlreadySeated(PlayerId),

    #[error("Стол заполнен ({0} мест)")]
    TableFull(u8),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotSeated(PlayerId),

    #[error("Игрок {0} уже в игре")]
    AlreadySittingIn(PlayerId),

    #[error("Игрок {0} уже пропускает раздачи")]
    AlreadySittingOut(PlayerId),

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Нельзя перейти с {from} на {to}: только на одну улицу вперёд")]
    InvalidStreetTransition { from: Street, to: Street },

    #[error("Торговля на улице ещё не завершена")]
    ActionNotComplete,

    #[error("На фазе {0} ставки невозможны")]
    NoBettingRound(Street),

    #[error("Блайнды не заданы в конфиге стола")]
    BlindsNotConfigured,

    #[error("Блайнды ещё не поставлены")]
    BlindsNotPosted,

    #[error("Игрок {0} не на позиции этого блайнда")]
    NotBlindSeat(PlayerId),

    #[error("Блайнд уже поставлен")]
    BlindAlreadyPosted,

    #[error("Игрок {0} не участвует в раздаче")]
    PlayerNotInHand(PlayerId),

    #[error("Игрок {0} уже в олл-ине")]
    PlayerAllIn(PlayerId),

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Ставка {amount} меньше уже поставленных {current}")]
    WagerBelowCurrentBet { amount: Chips, current: Chips },

    #[error("Недостаточно фишек: нужно {needed}, в стеке {stack}")]
    InsufficientStack { needed: Chips, stack: Chips },

    #[error("Ставка {amount} не уравнивает текущую {active} и это не олл-ин")]
    UnderCall { amount: Chips, active: Chips },

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Нельзя считать банки: на улице остались несобранные ставки")]
    OutstandingWager,

    #[error("Ни один из победителей не претендует на банк №{0}")]
    NoEligibleWinner(usize),

    #[error("Нет подходящего места по кругу")]
    NoEligibleSeat,

    #[error(transparent)]
    Chips(#[from] ChipsError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("Внутренняя ошибка: {0}")]
    Invariant(#[from] InvariantError),
}

impl EngineError {
    /// Дефект движка, а не неверная команда.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Invariant(_))
    }
}
