use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    One = 0,
    Two = 1,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based seat number shown to players.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub const fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub hand: Hand,
    pub points: u32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, points: u32) {
        self.points += points;
    }
}
