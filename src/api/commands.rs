use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Команда стола.
///
/// Всё, что меняет состояние стола, приходит сюда одной из этих команд
/// и разбирается в `engine::game_loop::apply`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Посадить игрока за стол (только между раздачами).
    AddPlayer { player_id: PlayerId, stack: Chips },

    /// Убрать игрока из-за стола (только между раздачами).
    RemovePlayer { player_id: PlayerId },

    SitIn { player_id: PlayerId },
    SitOut { player_id: PlayerId },

    /// Waiting -> Preflop.
    StartHand,
    StartFlop,
    StartTurn,
    StartRiver,
    StartShowdown,
    /// Showdown -> Waiting.
    EndHand,

    PostSmall { player_id: PlayerId },
    PostBig { player_id: PlayerId },

    Check { player_id: PlayerId },
    Fold { player_id: PlayerId },

    /// Довести ставку игрока на улице до `amount` (call/bet/raise/олл-ин).
    Wager { player_id: PlayerId, amount: Chips },
}

impl Command {
    /// Игрок, от имени которого команда, если есть.
    pub fn player_id(&self) -> Option<PlayerId> {
        match *self {
            Command::AddPlayer { player_id, .. }
            | Command::RemovePlayer { player_id }
            | Command::SitIn { player_id }
            | Command::SitOut { player_id }
            | Command::PostSmall { player_id }
            | Command::PostBig { player_id }
            | Command::Check { player_id }
            | Command::Fold { player_id }
            | Command::Wager { player_id, .. } => Some(player_id),
            Command::StartHand
            | Command::StartFlop
            | Command::StartTurn
            | Command::StartRiver
            | Command::StartShowdown
            | Command::EndHand => None,
        }
    }
}
