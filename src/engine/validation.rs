use crate::domain::chips::Chips;
use crate::domain::SeatState;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Общие проверки для любого действия игрока (включая блайнды).
pub fn validate_actor(seat: &SeatState, betting: &BettingState) -> Result<(), EngineError> {
    if !betting.street.is_betting() {
        return Err(EngineError::NoBettingRound(betting.street));
    }
    if !seat.is_in_hand() {
        return Err(EngineError::PlayerNotInHand(seat.player_id));
    }
    if seat.all_in {
        return Err(EngineError::PlayerAllIn(seat.player_id));
    }
    Ok(())
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Возвращает, сколько фишек уйдёт из стека.
pub fn validate_action(
    seat: &SeatState,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<Chips, EngineError> {
    match action {
        PlayerActionKind::Fold => Ok(Chips::ZERO),

        PlayerActionKind::Check => {
            if seat.current_bet == betting.active_bet {
                Ok(Chips::ZERO)
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        PlayerActionKind::Wager(amount) => {
            let amount = *amount;
            let delta = amount
                .checked_sub(seat.current_bet)
                .map_err(|_| EngineError::WagerBelowCurrentBet {
                    amount,
                    current: seat.current_bet,
                })?;
            if delta > seat.stack {
                return Err(EngineError::InsufficientStack {
                    needed: delta,
                    stack: seat.stack,
                });
            }
            // Недоколл разрешён только олл-ином.
            if amount < betting.active_bet && delta != seat.stack {
                return Err(EngineError::UnderCall {
                    amount,
                    active: betting.active_bet,
                });
            }
            Ok(delta)
        }

        // Блайнды проверяются отдельно: им нужны позиции стола.
        PlayerActionKind::PostSmall | PlayerActionKind::PostBig => Err(EngineError::IllegalAction),
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(seat: &SeatState, betting: &BettingState) -> Chips {
    betting
        .active_bet
        .checked_sub(seat.current_bet)
        .unwrap_or(Chips::ZERO)
}
