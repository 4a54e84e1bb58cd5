use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::pot::Pot;

/// Взнос одного игрока за раздачу.
///
/// `eligible = false` – игрок сфолдил: его фишки идут в банки,
/// но претендовать на них он не может.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub player_id: PlayerId,
    pub amount: Chips,
    pub eligible: bool,
}

/// Посчитать слои банка из суммарных взносов.
///
/// Взносы сортируются по возрастанию; на каждом новом уровне `w` создаётся
/// слой размера `(w - prev) * (число игроков, внёсших >= w)`.
/// Слои возвращаются "от младших" к "старшим".
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut entries: Vec<&Contribution> = contributions
        .iter()
        .filter(|c| !c.amount.is_zero())
        .collect();

    // Сортируем по размеру вклада (возрастание).
    entries.sort_by_key(|c| c.amount);

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev_level = Chips::ZERO;
    let mut pos = 0;

    while pos < entries.len() {
        let level = entries[pos].amount;
        let increment = match level.checked_sub(prev_level) {
            Ok(diff) if !diff.is_zero() => diff,
            _ => break,
        };

        // Все, кто на этой позиции и дальше, внесли не меньше level.
        let layer = &entries[pos..];
        let total = increment.times(layer.len());
        let pot = Pot::with_players(
            layer.iter().filter(|c| c.eligible).map(|c| c.player_id),
            total,
        );

        match pots.last_mut() {
            // Слой, на который никто не претендует, уходит в предыдущий.
            Some(last) if pot.eligible.is_empty() => last.add(total),
            _ => pots.push(pot),
        }

        prev_level = level;
        while pos < entries.len() && entries[pos].amount == level {
            pos += 1;
        }
    }

    pots
}

/// Влить новые слои в список банков стола.
///
/// Слой с тем же набором претендентов добавляется к существующему банку,
/// иначе становится новым банком. Старые банки, чьи наборы совпали после
/// фолдов, тоже склеиваются. Пустые банки-заготовки выбрасываются,
/// банк без претендентов уходит в предыдущий.
pub fn merge_layers(pots: &mut Vec<Pot>, layers: Vec<Pot>) {
    let existing = std::mem::take(pots);
    for pot in existing.into_iter().chain(layers) {
        if pot.is_empty() {
            continue;
        }
        if pot.eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.add(pot.total),
                None => pots.push(pot),
            }
            continue;
        }
        match pots.iter_mut().find(|p| p.eligible == pot.eligible) {
            Some(same) => same.add(pot.total),
            None => pots.push(pot),
        }
    }
}
