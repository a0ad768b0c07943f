use base64ct::{self, Base64, Encoding};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use super::card::{Card, ALL_RANKS, ALL_SUITS};

pub const DECK_LEN: usize = 52;
const SEED_LEN: usize = 32;
const ENCODED_SEED_LEN: usize = 4 * ((SEED_LEN + 3 - 1) / 3); // 4 * ceil(SEED_LEN / 3)

#[derive(Debug, PartialEq)]
pub enum DeckError {
    OutOfCards,
    SeedDecodeError(base64ct::Error),
}

impl Error for DeckError {}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::OutOfCards => write!(f, "No more cards in deck"),
            DeckError::SeedDecodeError(e) => write!(f, "{}", e),
        }
    }
}

impl From<base64ct::Error> for DeckError {
    fn from(e: base64ct::Error) -> Self {
        Self::SeedDecodeError(e)
    }
}

/// One or more standard 52-card decks, shuffled at construction and consumed
/// from the top by `draw`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(&DeckSeed::default())
    }
}

impl Deck {
    /// A single shuffled deck.
    pub fn new(seed: &DeckSeed) -> Self {
        Self::shoe(1, seed)
    }

    /// A shuffled shoe of `num_decks` interleaved decks (baccarat uses 8).
    pub fn shoe(num_decks: usize, seed: &DeckSeed) -> Self {
        use itertools::Itertools;
        let mut cards: Vec<Card> = Vec::with_capacity(num_decks * DECK_LEN);
        for _ in 0..num_decks {
            cards.extend(
                ALL_RANKS
                    .iter()
                    .cartesian_product(ALL_SUITS.iter())
                    .map(|x| Card::new(*x.0, *x.1)),
            );
        }
        let mut d = Deck { cards };
        d.seeded_shuffle(seed);
        d
    }

    pub fn deck_and_seed() -> (Deck, DeckSeed) {
        let ds = DeckSeed::default();
        let d = Deck::new(&ds);
        (d, ds)
    }

    /// Fisher-Yates over the whole shoe. For determinism given the same seed,
    /// the cards are put in a known order before shuffling.
    pub fn seeded_shuffle(&mut self, seed: &DeckSeed) {
        let mut rng = ChaChaRng::from_seed(seed.0);
        self.cards.sort_unstable();
        self.cards.shuffle(&mut rng)
    }

    /// Draw the topmost card, or an error if the deck is exhausted.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::OutOfCards)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// A deck that draws the given cards in order. Test rigging only.
    #[cfg(test)]
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut cards = cards;
        cards.reverse();
        Deck { cards }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckSeed([u8; SEED_LEN]);

impl DeckSeed {
    pub fn new(b: [u8; SEED_LEN]) -> Self {
        Self(b)
    }
}

impl Default for DeckSeed {
    fn default() -> Self {
        let mut b = [0u8; SEED_LEN];
        thread_rng().fill_bytes(&mut b);
        Self(b)
    }
}

impl fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = [0u8; ENCODED_SEED_LEN];
        Base64::encode(&self.0, &mut b).unwrap();
        write!(f, "{}", String::from_utf8_lossy(&b))
    }
}

impl FromStr for DeckSeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b: [u8; SEED_LEN] = [0; SEED_LEN];
        Base64::decode(s, &mut b)?;
        Ok(DeckSeed(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::cards_from_str;
    use std::collections::HashMap;

    const SEED1: DeckSeed = DeckSeed([1; SEED_LEN]);

    #[test]
    fn right_len() {
        let d = Deck::default();
        assert_eq!(d.remaining(), DECK_LEN);
        let s = Deck::shoe(8, &DeckSeed::default());
        assert_eq!(s.remaining(), 8 * DECK_LEN);
    }

    #[test]
    fn right_count() {
        let d = Deck::shoe(2, &DeckSeed::default());
        let mut counts: HashMap<Card, u16> = HashMap::new();
        for card in d.cards.iter() {
            *counts.entry(*card).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), DECK_LEN);
        for count in counts.values() {
            assert_eq!(*count, 2);
        }
    }

    #[test]
    fn draw_to_empty() {
        let mut d = Deck::default();
        for _ in 0..DECK_LEN {
            assert!(d.draw().is_ok());
        }
        assert_eq!(d.draw().unwrap_err(), DeckError::OutOfCards);
    }

    #[test]
    fn is_shuffled() {
        let mut d = Deck::default();
        let first_four: Vec<_> = (0..4).map(|_| d.draw().unwrap().rank).collect();
        if first_four.iter().all(|r| *r == first_four[0]) {
            panic!("Top four cards shared a rank! This indicates the deck was not shuffled. There is a *very* small chance this is a false positive.")
        }
    }

    /// Given a specific seed, the order of the cards should always be the same.
    #[test]
    fn deck_is_seedable() {
        let mut d1 = Deck::new(&SEED1);
        let mut d2 = Deck::new(&SEED1);
        for _ in 0..DECK_LEN {
            assert_eq!(d1.draw(), d2.draw());
        }
    }

    #[test]
    fn stacked_draws_in_order() {
        let cards = cards_from_str("AsKh9d2c");
        let mut d = Deck::stacked(cards.clone());
        for c in cards {
            assert_eq!(d.draw().unwrap(), c);
        }
    }

    #[test]
    fn seed_to_from_string() {
        let d = DeckSeed::default();
        let s = d.to_string();
        let d2: DeckSeed = s.parse().unwrap();
        assert_eq!(d, d2);
    }
}
