use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Один слой банка: кто может его выиграть и сколько в нём фишек.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub eligible: BTreeSet<PlayerId>,
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(eligible: impl IntoIterator<Item = PlayerId>, total: Chips) -> Self {
        Self {
            eligible: eligible.into_iter().collect(),
            total,
        }
    }

    pub fn is_eligible(&self, id: PlayerId) -> bool {
        self.eligible.contains(&id)
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    pub fn remove_player(&mut self, id: PlayerId) {
        self.eligible.remove(&id);
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_zero() && self.eligible.is_empty()
    }
}
