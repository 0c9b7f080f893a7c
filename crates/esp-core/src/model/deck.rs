use crate::model::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Cards not yet dealt, drawn from the front in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawPile {
    cards: VecDeque<Card>,
}

impl DrawPile {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn shuffled_with_seed(cards: Vec<Card>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cards = cards;
        cards.shuffle(&mut rng);
        Self::new(cards)
    }

    pub fn peek(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
