use std::collections::{BTreeMap, HashMap};

use log::{error, info};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::{CardSupply, Deck};
use crate::domain::street::Street;
use crate::domain::table::TableConfig;
use crate::domain::{PlayerId, SeatState};
use crate::engine::betting::{self, BettingState};
use crate::engine::errors::{EngineError, InvariantError};
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{count_dealable, Positions};
use crate::engine::pot::Pot;
use crate::engine::side_pots::{compute_side_pots, merge_layers, Contribution};
use crate::infra::rng::SystemRng;

/// Минимум игроков в игре, чтобы начать раздачу.
pub const MIN_PLAYERS: usize = 2;

/// Полное состояние одного стола.
///
/// Места хранятся плотным кольцом в порядке посадки; `index` отображает
/// игрока на позицию в кольце. Кнопка, блайнды и очередь хода – индексы
/// в этом кольце.
#[derive(Clone, Debug)]
pub struct TableState<S = Deck<SystemRng>> {
    pub(crate) config: TableConfig,
    pub(crate) seats: Vec<SeatState>,
    pub(crate) index: HashMap<PlayerId, usize>,
    pub(crate) positions: Positions,
    pub(crate) betting: BettingState,
    pub(crate) pots: Vec<Pot>,
    pub(crate) board: Vec<Card>,
    pub(crate) supply: S,
    pub(crate) history: HandHistory,
    pub(crate) hands_played: u64,
}

impl TableState<Deck<SystemRng>> {
    /// Стол с системной случайной колодой.
    pub fn with_system_deck(config: TableConfig) -> Self {
        Self::new(config, Deck::new(SystemRng))
    }
}

impl<S: CardSupply> TableState<S> {
    pub fn new(config: TableConfig, supply: S) -> Self {
        Self {
            config,
            seats: Vec::new(),
            index: HashMap::new(),
            positions: Positions::default(),
            betting: BettingState::default(),
            pots: Vec::new(),
            board: Vec::new(),
            supply,
            history: HandHistory::new(),
            hands_played: 0,
        }
    }

    // ---------- чтение состояния ----------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn street(&self) -> Street {
        self.betting.street
    }

    pub fn active_bet(&self) -> Chips {
        self.betting.active_bet
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn seat(&self, id: PlayerId) -> Option<&SeatState> {
        self.index.get(&id).and_then(|&idx| self.seats.get(idx))
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn supply(&self) -> &S {
        &self.supply
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_seated(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    fn player_at(&self, idx: Option<usize>) -> Option<PlayerId> {
        idx.and_then(|i| self.seats.get(i)).map(|s| s.player_id)
    }

    /// Чей сейчас ход.
    pub fn to_act(&self) -> Option<PlayerId> {
        self.player_at(self.betting.to_act)
    }

    pub fn button(&self) -> Option<PlayerId> {
        self.player_at(self.positions.button)
    }

    pub fn small_blind(&self) -> Option<PlayerId> {
        self.player_at(self.positions.small_blind)
    }

    pub fn big_blind(&self) -> Option<PlayerId> {
        self.player_at(self.positions.big_blind)
    }

    /// Можно ли начать новую раздачу прямо сейчас (места без фишек
    /// не в счёт).
    pub fn can_start_hand(&self) -> bool {
        self.betting.street == Street::Waiting && count_dealable(&self.seats) >= MIN_PLAYERS
    }

    pub fn is_action_complete(&self) -> bool {
        betting::is_action_complete(
            &self.seats,
            &self.betting,
            &self.positions,
            self.config.stakes.big_blind,
        )
    }

    /// Все фишки стола: стеки, несобранные ставки и банки.
    pub fn total_chips(&self) -> Chips {
        let in_seats: Chips = self.seats.iter().map(|s| s.stack + s.total_bet).sum();
        let in_pots: Chips = self.pots.iter().map(|p| p.total).sum();
        in_seats + in_pots
    }

    // ---------- кольцо и индекс ----------

    pub(crate) fn seat_index(&self, id: PlayerId) -> Result<usize, EngineError> {
        let idx = *self.index.get(&id).ok_or(EngineError::PlayerNotSeated(id))?;
        match self.seats.get(idx) {
            Some(seat) if seat.player_id == id => Ok(idx),
            _ => Err(self.ring_mismatch().into()),
        }
    }

    fn ring_mismatch(&self) -> InvariantError {
        InvariantError::SeatIndexMismatch {
            ring: self.seats.len(),
            index: self.index.len(),
        }
    }

    /// Кольцо мест и индекс игроков согласованы.
    pub fn check_ring(&self) -> Result<(), InvariantError> {
        let consistent = self.seats.len() == self.index.len()
            && self
                .seats
                .iter()
                .enumerate()
                .all(|(idx, s)| self.index.get(&s.player_id) == Some(&idx));
        if consistent {
            Ok(())
        } else {
            let err = self.ring_mismatch();
            error!("{err}");
            Err(err)
        }
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index = self
            .seats
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.player_id, idx))
            .collect();
    }

    // ---------- банки ----------

    /// Собрать вложенные за раздачу фишки в банки.
    ///
    /// Несобранная ставка текущей улицы – ошибка: банки считаются
    /// только между улицами.
    pub fn settle_pots(&mut self) -> Result<(), EngineError> {
        if self.seats.iter().any(|s| !s.current_bet.is_zero()) {
            return Err(EngineError::OutstandingWager);
        }
        self.collect_into_pots();
        Ok(())
    }

    pub(crate) fn collect_into_pots(&mut self) {
        let contributions: Vec<Contribution> = self
            .seats
            .iter()
            .map(|s| Contribution {
                player_id: s.player_id,
                amount: s.total_bet,
                eligible: s.is_in_hand(),
            })
            .collect();
        let layers = compute_side_pots(&contributions);

        // Сфолдившие больше ни на что не претендуют.
        for seat in self.seats.iter().filter(|s| !s.is_in_hand()) {
            for pot in &mut self.pots {
                pot.remove_player(seat.player_id);
            }
        }
        merge_layers(&mut self.pots, layers);

        // Банк без претендентов достаётся тем, кто ещё в раздаче.
        let unclaimed = self
            .pots
            .iter()
            .any(|p| p.eligible.is_empty() && !p.total.is_zero());
        if unclaimed {
            let in_hand: Vec<PlayerId> = self
                .seats
                .iter()
                .filter(|s| s.is_in_hand())
                .map(|s| s.player_id)
                .collect();
            for pot in self.pots.iter_mut().filter(|p| p.eligible.is_empty()) {
                pot.eligible.extend(in_hand.iter().copied());
            }
            merge_layers(&mut self.pots, Vec::new());
        }

        for seat in &mut self.seats {
            seat.total_bet = Chips::ZERO;
        }

        let totals: Vec<Chips> = self.pots.iter().map(|p| p.total).collect();
        info!("Банки пересчитаны: {totals:?}");
        self.history.push(HandEventKind::PotsSettled { totals });
    }

    /// Раздать банки по итогам шоудауна.
    ///
    /// `ranking` – группы игроков от сильнейшей руки к слабейшей;
    /// внутри группы руки равны. Каждый банк достаётся первой группе,
    /// в которой есть претендент, и делится поровну; лишние фишки идут
    /// по кругу, начиная слева от кнопки.
    pub fn award_pots(
        &mut self,
        ranking: &[Vec<PlayerId>],
    ) -> Result<Vec<(PlayerId, Chips)>, EngineError> {
        if self.betting.street != Street::Showdown {
            return Err(EngineError::IllegalAction);
        }
        if self.seats.iter().any(|s| !s.total_bet.is_zero()) {
            return Err(EngineError::OutstandingWager);
        }

        // Сначала всё считаем, потом трогаем стеки.
        let mut payouts: BTreeMap<PlayerId, Chips> = BTreeMap::new();
        for (pot_idx, pot) in self.pots.iter().enumerate() {
            if pot.total.is_zero() {
                continue;
            }
            let mut winners: Vec<usize> = ranking
                .iter()
                .map(|tier| {
                    tier.iter()
                        .filter(|id| pot.is_eligible(**id))
                        .filter_map(|id| self.index.get(id).copied())
                        .collect::<Vec<_>>()
                })
                .find(|w| !w.is_empty())
                .ok_or(EngineError::NoEligibleWinner(pot_idx))?;
            winners.sort_by_key(|&idx| self.distance_from_button(idx));
            winners.dedup();

            let count = winners.len() as u64;
            let share = pot.total.0 / count;
            let odd = (pot.total.0 % count) as usize;
            for (n, idx) in winners.into_iter().enumerate() {
                let bonus = if n < odd { 1 } else { 0 };
                let id = self.seats[idx].player_id;
                *payouts.entry(id).or_default() += Chips(share + bonus);
            }
        }

        for (&id, &amount) in &payouts {
            let idx = self.seat_index(id)?;
            self.seats[idx].stack += amount;
            info!("Игрок {id} забирает {amount}");
            self.history
                .push(HandEventKind::PotAwarded { player_id: id, amount });
        }
        self.pots.clear();

        Ok(payouts.into_iter().collect())
    }

    /// Расстояние по кругу от места слева от кнопки (оно само – 0).
    fn distance_from_button(&self, idx: usize) -> usize {
        let n = self.seats.len().max(1);
        let start = self.positions.button.map_or(0, |b| (b + 1) % n);
        (idx + n - start) % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: &[PlayerId]) -> TableState {
        let mut t = TableState::with_system_deck(TableConfig::default());
        for &id in ids {
            t.seats.push(SeatState::new(id, Chips(100)));
        }
        t.rebuild_index();
        t
    }

    #[test]
    fn ring_and_index_agree() {
        let mut t = table(&[5, 9, 2]);
        assert!(t.check_ring().is_ok());
        assert_eq!(t.seat_index(9), Ok(1));
        t.index.remove(&2);
        assert!(t.check_ring().is_err());
    }

    #[test]
    fn settle_refuses_outstanding_bets() {
        let mut t = table(&[1, 2]);
        t.seats[0].wager(Chips(10)).unwrap();
        assert_eq!(t.settle_pots(), Err(EngineError::OutstandingWager));
    }

    #[test]
    fn odd_chip_goes_left_of_button() {
        let mut t = table(&[1, 2, 3]);
        t.positions.button = Some(1);
        t.betting.street = Street::Showdown;
        t.pots = vec![Pot::with_players([1, 2, 3], Chips(31))];

        let paid = t.award_pots(&[vec![1, 2]]).unwrap();
        // Слева от кнопки (место 1) сидит игрок 3, затем 1.
        assert_eq!(paid, vec![(1, Chips(16)), (2, Chips(15))]);
        assert!(t.pots().is_empty());
    }

    #[test]
    fn unclaimed_chips_go_to_players_still_in_hand() {
        let mut t = table(&[1, 2, 3]);
        t.pots = vec![Pot::new()];
        t.seats[0].total_bet = Chips(5);
        t.seats[0].folded = true;
        t.seats[1].folded = true;

        t.collect_into_pots();
        assert_eq!(t.pots, vec![Pot::with_players([3], Chips(5))]);
    }

    #[test]
    fn award_fails_without_eligible_winner() {
        let mut t = table(&[1, 2, 3]);
        t.betting.street = Street::Showdown;
        t.pots = vec![
            Pot::with_players([1, 2], Chips(20)),
            Pot::with_players([2], Chips(10)),
        ];
        assert_eq!(
            t.award_pots(&[vec![1], vec![3]]),
            Err(EngineError::NoEligibleWinner(1))
        );
        assert_eq!(t.seats[0].stack, Chips(100));
    }
}
