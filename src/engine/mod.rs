//! Движок стола: позиции, ставки, переход улиц, сайд-поты.
//!
//! Высокоуровневый объект: `TableState`
//! Основные операции:
//!   - `apply` – применить команду к столу
//!   - `TableState::settle_pots` – собрать ставки в банки
//!   - `TableState::award_pots` – раздать банки по итогам шоудауна

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod table_state;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use errors::{EngineError, InvariantError};
pub use game_loop::apply;
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use positions::Positions;
pub use pot::Pot;
pub use side_pots::{compute_side_pots, Contribution};
pub use table_state::{TableState, MIN_PLAYERS};

/// RNG интерфейс для колоды.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
