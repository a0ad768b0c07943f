use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};

/// The cards held by one party (player, dealer, or banker) during a round.
/// Created empty, appended to by draws, cleared at round end.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, c: Card) {
        self.cards.push(c);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Blackjack total with soft-ace reduction: aces start at eleven and are
    /// knocked down to one, one at a time, while the total is over 21.
    pub fn blackjack_total(&self) -> u8 {
        let mut total: u8 = self.cards.iter().map(|c| c.rank.blackjack_value()).sum();
        let mut soft_aces = self.cards.iter().filter(|c| c.rank == Rank::Ace).count();
        while total > 21 && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        total
    }

    /// Baccarat total: sum of card values mod 10, always in 0..=9.
    pub fn baccarat_total(&self) -> u8 {
        let total: u8 = self.cards.iter().map(|c| c.rank.baccarat_value()).sum();
        total % 10
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use itertools::Itertools;
        write!(f, "{}", self.cards.iter().map(|c| c.to_string()).join(" "))
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}
