use core::fmt;

use serde::{Deserialize, Serialize};

/// Улица раздачи (плюс служебные фазы Waiting и Showdown).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Street {
    /// Раздачи нет.
    #[default]
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая фаза по кругу: Showdown -> Waiting.
    pub fn next(self) -> Street {
        match self {
            Street::Waiting => Street::Preflop,
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Waiting,
        }
    }

    /// Допускает ли фаза ставки.
    pub fn is_betting(self) -> bool {
        !matches!(self, Street::Waiting | Street::Showdown)
    }

    /// Сколько общих карт открывается при входе на улицу.
    pub fn community_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Waiting => "waiting",
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(name)
    }
}
