use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::street::Street;
use crate::domain::PlayerId;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatViewDto {
    pub player_id: PlayerId,
    /// Позиция в кольце мест.
    pub seat_index: u8,
    pub stack: Chips,
    pub current_bet: Chips,
    /// Сколько нужно добавить, чтобы уравнять.
    pub to_call: Chips,
    pub sitting_in: bool,
    pub folded: bool,
    pub all_in: bool,
    pub has_acted: bool,
    /// Карманные карты – только для "героя" или в режиме администратора.
    pub hole_cards: Option<Vec<Card>>,
}

/// DTO одного банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotViewDto {
    pub total: Chips,
    pub eligible: Vec<PlayerId>,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub max_seats: u8,
    pub small_blind: Option<Chips>,
    pub big_blind: Option<Chips>,
    pub street: Street,
    pub hand_number: u64,
    pub button: Option<PlayerId>,
    pub small_blind_player: Option<PlayerId>,
    pub big_blind_player: Option<PlayerId>,
    /// Текущий игрок, чей ход (если раздача идёт).
    pub to_act: Option<PlayerId>,
    pub active_bet: Chips,
    pub board: Vec<Card>,
    pub pots: Vec<PotViewDto>,
    pub seats: Vec<SeatViewDto>,
    pub can_start_hand: bool,
    pub action_complete: bool,
}
