use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 600.0;
/// Numbers on the card run 1 through 40.
pub const POOL_SIZE: u8 = 40;
/// A ticket is exactly ten picks, and ten balls are drawn.
pub const PICKS: usize = 10;
/// Multiplier by match count, 0 through 10.
pub const PAYTABLE: [Currency; PICKS + 1] =
    [0.0, 0.0, 2.0, 4.0, 8.0, 12.0, 25.0, 50.0, 120.0, 250.0, 500.0];

/// One draw, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub drawn: BTreeSet<u8>,
    pub matches: usize,
    pub result: RoundResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keno {
    session: Session,
}

impl Default for Keno {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl Keno {
    pub fn with_bankroll(bankroll: Currency) -> Self {
        Self {
            session: Session::new(bankroll),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn balance(&self) -> Currency {
        self.session.balance()
    }

    /// Draw ten balls against the player's ticket. An incomplete or
    /// out-of-range ticket is rejected before the wager is taken.
    pub fn draw<R: Rng>(
        &mut self,
        rng: &mut R,
        wager: Currency,
        picks: &BTreeSet<u8>,
    ) -> Result<Draw, GameError> {
        if picks.len() != PICKS {
            return Err(GameError::KenoSelectionSize(picks.len()));
        }
        if let Some(bad) = picks.iter().find(|n| **n < 1 || **n > POOL_SIZE) {
            return Err(GameError::KenoPickOutOfRange(*bad));
        }
        self.session.place_wager(wager)?;
        let mut pool: Vec<u8> = (1..=POOL_SIZE).collect();
        pool.shuffle(rng);
        let drawn: BTreeSet<u8> = pool.into_iter().take(PICKS).collect();
        Ok(self.resolve(wager, picks, drawn))
    }

    fn resolve(&mut self, wager: Currency, picks: &BTreeSet<u8>, drawn: BTreeSet<u8>) -> Draw {
        let matches = picks.intersection(&drawn).count();
        let payout = wager * PAYTABLE[matches];
        let message = if payout > 0.0 {
            format!("{} of {} numbers hit. You win {:.2}!", matches, PICKS, payout)
        } else {
            format!("{} of {} numbers hit. You lose.", matches, PICKS)
        };
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        Draw {
            drawn,
            matches,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn ticket(ns: impl IntoIterator<Item = u8>) -> BTreeSet<u8> {
        ns.into_iter().collect()
    }

    #[test]
    fn short_ticket_rejected_without_charge() {
        let mut game = Keno::default();
        let mut rng = ChaChaRng::seed_from_u64(1);
        let err = game.draw(&mut rng, 10.0, &ticket(1..=9)).unwrap_err();
        assert!(matches!(err, GameError::KenoSelectionSize(9)));
        assert_eq!(game.balance(), STARTING_BANKROLL);
        assert!(game.session().history().is_empty());
    }

    #[test]
    fn out_of_range_pick_rejected() {
        let mut game = Keno::default();
        let mut rng = ChaChaRng::seed_from_u64(1);
        let mut picks = ticket(1..=9);
        picks.insert(41);
        let err = game.draw(&mut rng, 10.0, &picks).unwrap_err();
        assert!(matches!(err, GameError::KenoPickOutOfRange(41)));
        assert_eq!(game.balance(), STARTING_BANKROLL);
    }

    #[test]
    fn draws_ten_distinct_in_pool() {
        let mut game = Keno::with_bankroll(1_000_000.0);
        let mut rng = ChaChaRng::seed_from_u64(5);
        for _ in 0..100 {
            let draw = game.draw(&mut rng, 1.0, &ticket(1..=10)).unwrap();
            assert_eq!(draw.drawn.len(), PICKS);
            assert!(draw.drawn.iter().all(|n| (1..=POOL_SIZE).contains(n)));
            assert_eq!(draw.result.payout, 1.0 * PAYTABLE[draw.matches]);
        }
    }

    /// Matching all ten always pays x500, whatever the ticket.
    #[test]
    fn full_match_pays_five_hundred() {
        let mut game = Keno::default();
        let picks = ticket(31..=40);
        game.session.place_wager(2.0).unwrap();
        let draw = game.resolve(2.0, &picks, picks.clone());
        assert_eq!(draw.matches, 10);
        assert_eq!(draw.result.payout, 1000.0);
        assert_eq!(game.balance(), STARTING_BANKROLL - 2.0 + 1000.0);
    }

    #[test]
    fn no_overlap_pays_nothing() {
        let mut game = Keno::default();
        game.session.place_wager(2.0).unwrap();
        let draw = game.resolve(2.0, &ticket(1..=10), ticket(11..=20));
        assert_eq!(draw.matches, 0);
        assert_eq!(draw.result.payout, 0.0);
    }

    #[test]
    fn paytable_shape() {
        assert_eq!(PAYTABLE.len(), PICKS + 1);
        assert_eq!(PAYTABLE[0], 0.0);
        assert_eq!(PAYTABLE[1], 0.0);
        assert_eq!(PAYTABLE[2], 2.0);
        assert_eq!(PAYTABLE[5], 12.0);
        assert_eq!(PAYTABLE[8], 120.0);
    }
}
