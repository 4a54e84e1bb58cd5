use crate::domain::deck::CardSupply;
use crate::domain::PlayerId;
use crate::engine::table_state::TableState;
use crate::engine::validation::diff_to_call;

use super::dto::{PotViewDto, SeatViewDto, TableViewDto};

/// Сформировать DTO стола.
///
/// `is_hero` решает, чьи карманные карты видно в ответе.
pub fn build_table_view<S: CardSupply>(
    table: &TableState<S>,
    is_hero: impl Fn(PlayerId) -> bool,
) -> TableViewDto {
    let stakes = &table.config().stakes;

    TableViewDto {
        max_seats: table.config().max_seats,
        small_blind: stakes.small_blind,
        big_blind: stakes.big_blind,
        street: table.street(),
        hand_number: table.hands_played(),
        button: table.button(),
        small_blind_player: table.small_blind(),
        big_blind_player: table.big_blind(),
        to_act: table.to_act(),
        active_bet: table.active_bet(),
        board: table.board().to_vec(),
        pots: build_pots_dto(table),
        seats: build_seats_dto(table, &is_hero),
        can_start_hand: table.can_start_hand(),
        action_complete: table.is_action_complete(),
    }
}

fn build_seats_dto<S: CardSupply>(
    table: &TableState<S>,
    is_hero: &impl Fn(PlayerId) -> bool,
) -> Vec<SeatViewDto> {
    table
        .seats()
        .iter()
        .enumerate()
        .map(|(idx, seat)| SeatViewDto {
            player_id: seat.player_id,
            seat_index: idx as u8,
            stack: seat.stack,
            current_bet: seat.current_bet,
            to_call: diff_to_call(seat, table.betting()),
            sitting_in: seat.sitting_in,
            folded: seat.folded,
            all_in: seat.all_in,
            has_acted: seat.has_acted,
            hole_cards: if is_hero(seat.player_id) {
                Some(seat.hole_cards.clone())
            } else {
                None
            },
        })
        .collect()
}

fn build_pots_dto<S: CardSupply>(table: &TableState<S>) -> Vec<PotViewDto> {
    table
        .pots()
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| PotViewDto {
            total: p.total,
            eligible: p.eligible.iter().copied().collect(),
        })
        .collect()
}
