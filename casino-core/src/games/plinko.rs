use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 600.0;
/// One multiplier per landing slot, edge to edge.
pub const MULTIPLIERS: [Currency; 10] = [0.0, 0.2, 0.5, 0.8, 1.0, 1.2, 2.0, 5.0, 10.0, 15.0];

/// Where the chip landed, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub slot: usize,
    pub multiplier: Currency,
    pub result: RoundResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plinko {
    session: Session,
}

impl Default for Plinko {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl Plinko {
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

    pub fn drop_chip<R: Rng>(&mut self, rng: &mut R, wager: Currency) -> Result<Drop, GameError> {
        self.session.place_wager(wager)?;
        let slot = rng.gen_range(0..MULTIPLIERS.len());
        let multiplier = MULTIPLIERS[slot];
        let payout = wager * multiplier;
        let message = if payout > 0.0 {
            format!(
                "The chip lands in slot {} (x{}). You win {:.2}!",
                slot, multiplier, payout
            )
        } else {
            format!("The chip lands in slot {} (x{}). You lose.", slot, multiplier)
        };
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        Ok(Drop {
            slot,
            multiplier,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn payout_is_wager_times_slot_multiplier() {
        let mut game = Plinko::with_bankroll(1_000_000.0);
        let mut rng = ChaChaRng::seed_from_u64(3);
        for _ in 0..200 {
            let drop = game.drop_chip(&mut rng, 10.0).unwrap();
            assert!(drop.slot < MULTIPLIERS.len());
            assert_eq!(drop.multiplier, MULTIPLIERS[drop.slot]);
            assert_eq!(drop.result.payout, 10.0 * drop.multiplier);
        }
        assert_eq!(game.session().history().len(), 200);
    }

    #[test]
    fn invalid_wager_rejected() {
        let mut game = Plinko::default();
        let mut rng = ChaChaRng::seed_from_u64(3);
        assert!(game.drop_chip(&mut rng, 0.0).is_err());
        assert!(game.drop_chip(&mut rng, STARTING_BANKROLL * 2.0).is_err());
        assert_eq!(game.balance(), STARTING_BANKROLL);
    }
}
