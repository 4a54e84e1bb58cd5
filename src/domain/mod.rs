//! Доменная модель стола: фишки, карты, колода, места, улицы, конфиг.

pub mod card;
pub mod chips;
pub mod deck;
pub mod seat;
pub mod street;
pub mod table;

/// Внешний идентификатор игрока. Уникален, пока игрок сидит за столом.
pub type PlayerId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use seat::*;
pub use street::*;
pub use table::*;
