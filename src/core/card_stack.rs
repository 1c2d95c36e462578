//! Auto-cycling card deck.
//!
//! The last card in the deck is the one on top.  On every interval tick the
//! top card moves to the bottom; a click can also send a specific card
//! there.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub label: String,
}

impl Card {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardStack {
    cards: VecDeque<Card>,
}

impl CardStack {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Move the top card to the bottom.
    pub fn rotate(&mut self) {
        if let Some(top) = self.cards.pop_back() {
            self.cards.push_front(top);
        }
    }

    pub fn rotate_by(&mut self, n: u32) {
        if self.cards.is_empty() {
            return;
        }
        let n = n as usize % self.cards.len();
        self.cards.rotate_right(n);
    }

    /// Move card `id` to the bottom.  Unknown ids are ignored.
    pub fn send_to_back(&mut self, id: u32) -> bool {
        let Some(index) = self.cards.iter().position(|c| c.id == id) else {
            return false;
        };
        if let Some(card) = self.cards.remove(index) {
            self.cards.push_front(card);
        }
        true
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Cards from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(stack: &CardStack) -> Vec<u32> {
        stack.iter().map(|c| c.id).collect()
    }

    fn deck() -> CardStack {
        CardStack::new((1..=4).map(|i| Card::new(i, format!("card {i}"))))
    }

    #[test]
    fn rotate_moves_top_to_bottom() {
        let mut s = deck();
        assert_eq!(s.top().map(|c| c.id), Some(4));
        s.rotate();
        assert_eq!(ids(&s), vec![4, 1, 2, 3]);
        s.rotate_by(5);
        assert_eq!(ids(&s), vec![3, 4, 1, 2]);
    }

    #[test]
    fn send_to_back_reorders_known_cards_only() {
        let mut s = deck();
        assert!(s.send_to_back(3));
        assert_eq!(ids(&s), vec![3, 1, 2, 4]);
        assert!(!s.send_to_back(99));
        assert_eq!(ids(&s), vec![3, 1, 2, 4]);
    }

    #[test]
    fn empty_stack_is_inert() {
        let mut s = CardStack::default();
        s.rotate();
        s.rotate_by(3);
        assert!(s.top().is_none());
    }
}
