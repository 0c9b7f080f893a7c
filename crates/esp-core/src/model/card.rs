use crate::model::spice::Spice;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub value: u8,
    pub spice: Spice,
}

impl Card {
    pub const MIN_VALUE: u8 = 1;
    pub const MAX_VALUE: u8 = 10;

    pub const fn new(value: u8, spice: Spice) -> Option<Self> {
        if value >= Self::MIN_VALUE && value <= Self::MAX_VALUE {
            Some(Self { value, spice })
        } else {
            None
        }
    }

    pub fn matches_spice(self, other: Card) -> bool {
        self.spice == other.spice
    }

    pub fn matches_value(self, other: Card) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.value, self.spice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("card `{0}` is missing the `_` separator")]
    MissingSeparator(String),
    #[error("card `{0}` has an invalid value")]
    InvalidValue(String),
    #[error("card `{0}` has an invalid spice")]
    InvalidSpice(String),
}

/// Parses the `<value>_<spice>` form. The value must be written without sign
/// or padding, so `10_c` and `3_w` are accepted while `03_w` and `+3_w` are not.
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (value_text, spice_text) = token
            .split_once('_')
            .ok_or_else(|| CardParseError::MissingSeparator(token.to_string()))?;

        let invalid_value = || CardParseError::InvalidValue(token.to_string());
        if value_text.is_empty() || !value_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_value());
        }
        let value: u8 = value_text.parse().map_err(|_| invalid_value())?;
        let canonical_width = if value == Self::MAX_VALUE { 2 } else { 1 };
        if value_text.len() != canonical_width {
            return Err(invalid_value());
        }

        let mut symbols = spice_text.chars();
        let spice = match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => Spice::from_symbol(symbol),
            _ => None,
        }
        .ok_or_else(|| CardParseError::InvalidSpice(token.to_string()))?;

        Card::new(value, spice).ok_or_else(invalid_value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardParseError};
    use crate::model::spice::Spice;

    #[test]
    fn parses_single_and_double_digit_values() {
        assert_eq!("3_w".parse::<Card>(), Ok(Card { value: 3, spice: Spice::W }));
        assert_eq!("10_c".parse::<Card>(), Ok(Card { value: 10, spice: Spice::C }));
    }

    #[test]
    fn display_matches_token_form() {
        let card = Card::new(10, Spice::P).unwrap();
        assert_eq!(card.to_string(), "10_p");
        assert_eq!(card.to_string().parse::<Card>(), Ok(card));
    }

    #[test]
    fn rejects_values_outside_range() {
        assert!(matches!("0_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
        assert!(matches!("11_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
        assert_eq!(Card::new(0, Spice::C), None);
    }

    #[test]
    fn rejects_padded_or_signed_values() {
        assert!(matches!("03_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
        assert!(matches!("+3_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
        assert!(matches!("-3_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
        assert!(matches!("010_c".parse::<Card>(), Err(CardParseError::InvalidValue(_))));
    }

    #[test]
    fn rejects_bad_spice_or_separator() {
        assert!(matches!("3_x".parse::<Card>(), Err(CardParseError::InvalidSpice(_))));
        assert!(matches!("3_cc".parse::<Card>(), Err(CardParseError::InvalidSpice(_))));
        assert!(matches!("3_".parse::<Card>(), Err(CardParseError::InvalidSpice(_))));
        assert!(matches!("3c".parse::<Card>(), Err(CardParseError::MissingSeparator(_))));
    }

    #[test]
    fn axis_comparisons() {
        let a = Card::new(2, Spice::C).unwrap();
        let b = Card::new(2, Spice::W).unwrap();
        assert!(a.matches_value(b));
        assert!(!a.matches_spice(b));
    }
}
