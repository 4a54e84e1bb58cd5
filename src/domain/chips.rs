use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибка арифметики фишек.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ChipsError {
    #[error("Нельзя вычесть {rhs} из {lhs}: стек уйдёт в минус")]
    Negative { lhs: Chips, rhs: Chips },
}

/// Количество фишек. Обёртка над u64, чтобы не путать с обычными числами.
///
/// Оператора `-` нет намеренно: вычитание только через `checked_sub`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Вычитание с ошибкой вместо ухода в минус.
    pub fn checked_sub(self, rhs: Chips) -> Result<Chips, ChipsError> {
        self.0
            .checked_sub(rhs.0)
            .map(Chips)
            .ok_or(ChipsError::Negative { lhs: self, rhs })
    }

    /// Умножение на число игроков (для слоёв side pot).
    pub fn times(self, n: usize) -> Chips {
        Chips(self.0.saturating_mul(n as u64))
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
