use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Жёсткий предел мест за одним столом.
pub const MAX_SEATS: u8 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Количество мест {0} вне диапазона 2..=8")]
    BadSeatCount(u8),

    #[error("Малый блайнд {small} больше большого {big}")]
    SmallAboveBig { small: Chips, big: Chips },

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Стейки стола (SB/BB). Пока блайнды не заданы, ставки невозможны.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Option<Chips>,
    pub big_blind: Option<Chips>,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: Some(sb),
            big_blind: Some(bb),
        }
    }

    /// Оба блайнда, если заданы.
    pub fn blinds(&self) -> Option<(Chips, Chips)> {
        Some((self.small_blind?, self.big_blind?))
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::new(Chips(1), Chips(2))
    }
}

/// Конфиг стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Максимальное количество мест (2..=8).
    pub max_seats: u8,
    pub stakes: TableStakes,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            stakes: TableStakes::default(),
        }
    }
}

impl TableConfig {
    pub fn with_stakes(stakes: TableStakes) -> Self {
        Self {
            stakes,
            ..Self::default()
        }
    }

    /// Разобрать JSON-конфиг и сразу проверить его.
    ///
    /// Отсутствующие поля берутся из `Default`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::BadSeatCount(self.max_seats));
        }
        if let Some((small, big)) = self.stakes.blinds() {
            if small > big {
                return Err(ConfigError::SmallAboveBig { small, big });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_config_fills_defaults() {
        let cfg = TableConfig::from_json(r#"{ "max_seats": 6 }"#).unwrap();
        assert_eq!(cfg.max_seats, 6);
        assert_eq!(cfg.stakes, TableStakes::default());
    }

    #[test]
    fn json_config_without_blinds() {
        let cfg = TableConfig::from_json(
            r#"{ "stakes": { "small_blind": null, "big_blind": null } }"#,
        )
        .unwrap();
        assert_eq!(cfg.stakes.blinds(), None);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            TableConfig::from_json(r#"{ "max_seats": 9 }"#),
            Err(ConfigError::BadSeatCount(9))
        ));
        assert!(matches!(
            TableConfig::from_json(r#"{ "stakes": { "small_blind": 5, "big_blind": 2 } }"#),
            Err(ConfigError::SmallAboveBig { .. })
        ));
        assert!(matches!(
            TableConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
