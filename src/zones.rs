//! Card zones (deck, hands, discard pile)

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
}

/// An ordered zone of cards
///
/// For the deck the end of the vector is the top. For a hand the order is
/// draw order, which is also the order choices are presented in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.position(card_id) {
            // order-preserving; controllers index into hands
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn insert_at(&mut self, index: usize, card_id: CardId) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card_id);
    }

    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|&id| id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[CardId] {
        &self.cards
    }

    /// Draw from top (for the deck)
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Empty the zone, returning its cards in order
    pub fn take_all(&mut self) -> Vec<CardId> {
        std::mem::take(&mut self.cards)
    }
}
