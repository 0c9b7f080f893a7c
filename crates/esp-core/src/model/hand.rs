use crate::model::card::Card;
use std::cmp::Ordering;
use std::collections::TryReserveError;

/// Ordered cards held by one player.
///
/// Insertion order is kept until [`Hand::sort`] is called; the engine sorts
/// after every deal, draw and swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Tail insert. Growth goes through `try_reserve` so that an exhausted
    /// allocator is reported to the caller instead of aborting.
    pub fn append(&mut self, card: Card) -> Result<(), TryReserveError> {
        self.cards.try_reserve(1)?;
        self.cards.push(card);
        Ok(())
    }

    pub fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.cards.try_reserve(additional)
    }

    pub fn remove(&mut self, card: Card) -> Option<Card> {
        let index = self.cards.iter().position(|&c| c == card)?;
        Some(self.cards.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Repeated adjacent compare-and-swap passes until a pass makes no swap.
    /// Equal cards are never swapped, so the order is stable.
    pub fn sort(&mut self) {
        let mut swapped = true;
        while swapped {
            swapped = false;
            for i in 1..self.cards.len() {
                if compare(&self.cards[i - 1], &self.cards[i]) == Ordering::Greater {
                    self.cards.swap(i - 1, i);
                    swapped = true;
                }
            }
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.cards
            .windows(2)
            .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
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

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

fn compare(a: &Card, b: &Card) -> Ordering {
    a.spice.cmp(&b.spice).then(a.value.cmp(&b.value))
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    fn hand(tokens: &[&str]) -> Hand {
        Hand::with_cards(tokens.iter().map(|t| card(t)).collect())
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut hand = Hand::new();
        hand.append(card("9_w")).unwrap();
        hand.append(card("1_c")).unwrap();
        assert_eq!(hand.cards(), &[card("9_w"), card("1_c")]);
    }

    #[test]
    fn remove_by_value_takes_first_match() {
        let mut hand = hand(&["2_c", "5_p", "7_w"]);
        assert_eq!(hand.remove(card("5_p")), Some(card("5_p")));
        assert_eq!(hand.remove(card("5_p")), None);
        assert_eq!(hand.cards(), &[card("2_c"), card("7_w")]);
    }

    #[test]
    fn remove_at_checks_bounds() {
        let mut hand = hand(&["2_c", "5_p"]);
        assert_eq!(hand.remove_at(2), None);
        assert_eq!(hand.remove_at(0), Some(card("2_c")));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn cards_are_sorted_by_spice_then_value() {
        let mut hand = hand(&["10_w", "3_p", "1_w", "10_c", "2_c", "9_p"]);
        hand.sort();
        let tokens: Vec<String> = hand.iter().map(ToString::to_string).collect();
        assert_eq!(tokens, ["2_c", "10_c", "3_p", "9_p", "1_w", "10_w"]);
        assert!(hand.is_sorted());
    }

    #[test]
    fn sort_relinks_head_when_first_card_moves() {
        let mut hand = hand(&["8_w", "1_c"]);
        hand.sort();
        assert_eq!(hand.get(0), Some(card("1_c")));
    }

    #[test]
    fn sort_is_idempotent() {
        let mut hand = hand(&["4_p", "4_c", "1_w", "7_c"]);
        hand.sort();
        let once = hand.clone();
        hand.sort();
        assert_eq!(hand, once);
    }

    #[test]
    fn sort_keeps_duplicates_stable_and_handles_empty() {
        let mut empty = Hand::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut dupes = hand(&["3_w", "3_c", "3_w"]);
        dupes.sort();
        assert_eq!(dupes.cards(), &[card("3_c"), card("3_w"), card("3_w")]);
    }
}
