//! Покерный стол (Texas Hold'em) как машина состояний.
//!
//! Стол принимает команды (`api::Command`), проверяет их и переводит
//! раздачу по улицам: посадка игроков, кнопка и блайнды, ставки,
//! сайд-поты. Оценку рук движок не делает – порядок рук на шоудауне
//! передаётся снаружи в `TableState::award_pots`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use api::{build_table_view, Command, TableViewDto};
pub use domain::{Chips, PlayerId, Street, TableConfig};
pub use engine::{apply, EngineError, TableState};
