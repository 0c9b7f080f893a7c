use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Spice {
    C = b'c',
    P = b'p',
    W = b'w',
}

impl Spice {
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'c' => Some(Spice::C),
            'p' => Some(Spice::P),
            'w' => Some(Spice::W),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for Spice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Spice;

    #[test]
    fn display_returns_lowercase_symbols() {
        assert_eq!(Spice::C.to_string(), "c");
        assert_eq!(Spice::W.to_string(), "w");
    }

    #[test]
    fn from_symbol_maps_valid_values() {
        assert_eq!(Spice::from_symbol('p'), Some(Spice::P));
        assert_eq!(Spice::from_symbol('P'), None);
        assert_eq!(Spice::from_symbol('x'), None);
    }

    #[test]
    fn ordering_follows_symbol_order() {
        assert!(Spice::C < Spice::P);
        assert!(Spice::P < Spice::W);
    }
}
