use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 500.0;
/// European wheel: pockets 0 through 36.
pub const HIGHEST_POCKET: u8 = 36;
/// The 18 red pockets on a standard wheel; 0 is green, the rest are black.
pub const RED_POCKETS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

const STRAIGHT_PAYS: Currency = 36.0;
const EVEN_MONEY_PAYS: Currency = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    /// A matched color pays even money, except the green zero which pays like
    /// a straight hit.
    fn multiplier(self) -> Currency {
        match self {
            Color::Green => STRAIGHT_PAYS,
            Color::Red | Color::Black => EVEN_MONEY_PAYS,
        }
    }
}

pub fn pocket_color(pocket: u8) -> Color {
    if pocket == 0 {
        Color::Green
    } else if RED_POCKETS.contains(&pocket) {
        Color::Red
    } else {
        Color::Black
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouletteBet {
    Red,
    Black,
    Odd,
    Even,
    Low,
    High,
    /// A single exact pocket, 0 through 36.
    Straight(u8),
}

impl std::fmt::Display for RouletteBet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouletteBet::Red => write!(f, "red"),
            RouletteBet::Black => write!(f, "black"),
            RouletteBet::Odd => write!(f, "odd"),
            RouletteBet::Even => write!(f, "even"),
            RouletteBet::Low => write!(f, "low (1-18)"),
            RouletteBet::High => write!(f, "high (19-36)"),
            RouletteBet::Straight(n) => write!(f, "straight {}", n),
        }
    }
}

/// What one spin produced, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub pocket: u8,
    pub color: Color,
    pub result: RoundResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roulette {
    session: Session,
}

impl Default for Roulette {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl Roulette {
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

    /// Spin the wheel. Straight bets outside the wheel and bad wagers are
    /// rejected before anything changes.
    pub fn spin<R: Rng>(
        &mut self,
        rng: &mut R,
        wager: Currency,
        bet: RouletteBet,
    ) -> Result<Spin, GameError> {
        if let RouletteBet::Straight(n) = bet {
            if n > HIGHEST_POCKET {
                return Err(GameError::StraightOutOfRange(n));
            }
        }
        self.session.place_wager(wager)?;
        let pocket = rng.gen_range(0..=HIGHEST_POCKET);
        let color = pocket_color(pocket);
        let multiplier = Self::multiplier(pocket, color, bet);
        let payout = wager * multiplier;
        let message = if payout > 0.0 {
            format!(
                "The ball lands on {} ({}). Your {} bet wins {:.2}!",
                pocket, color, bet, payout
            )
        } else {
            format!(
                "The ball lands on {} ({}). Your {} bet loses.",
                pocket, color, bet
            )
        };
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        Ok(Spin {
            pocket,
            color,
            result,
        })
    }

    fn multiplier(pocket: u8, color: Color, bet: RouletteBet) -> Currency {
        match bet {
            RouletteBet::Straight(n) => {
                if pocket == n {
                    STRAIGHT_PAYS
                } else {
                    0.0
                }
            }
            RouletteBet::Red if color == Color::Red => color.multiplier(),
            RouletteBet::Black if color == Color::Black => color.multiplier(),
            // Zero is neither odd nor even nor low nor high for betting.
            RouletteBet::Odd if pocket != 0 && pocket % 2 == 1 => EVEN_MONEY_PAYS,
            RouletteBet::Even if pocket != 0 && pocket % 2 == 0 => EVEN_MONEY_PAYS,
            RouletteBet::Low if (1..=18).contains(&pocket) => EVEN_MONEY_PAYS,
            RouletteBet::High if (19..=36).contains(&pocket) => EVEN_MONEY_PAYS,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn rng() -> ChaChaRng {
        ChaChaRng::seed_from_u64(7)
    }

    #[test]
    fn zero_is_green_reds_are_red() {
        assert_eq!(pocket_color(0), Color::Green);
        for n in RED_POCKETS {
            assert_eq!(pocket_color(n), Color::Red);
        }
        for n in 1..=HIGHEST_POCKET {
            if !RED_POCKETS.contains(&n) {
                assert_eq!(pocket_color(n), Color::Black);
            }
        }
    }

    #[test]
    fn straight_hit_pays_thirty_six() {
        for pocket in 0..=HIGHEST_POCKET {
            let color = pocket_color(pocket);
            assert_eq!(
                Roulette::multiplier(pocket, color, RouletteBet::Straight(pocket)),
                36.0
            );
            let miss = (pocket + 1) % 37;
            assert_eq!(
                Roulette::multiplier(miss, pocket_color(miss), RouletteBet::Straight(pocket)),
                0.0
            );
        }
    }

    #[test]
    fn zero_loses_every_outside_bet() {
        for bet in [
            RouletteBet::Red,
            RouletteBet::Black,
            RouletteBet::Odd,
            RouletteBet::Even,
            RouletteBet::Low,
            RouletteBet::High,
        ] {
            assert_eq!(Roulette::multiplier(0, Color::Green, bet), 0.0);
        }
    }

    #[test]
    fn even_money_bets() {
        assert_eq!(Roulette::multiplier(17, Color::Black, RouletteBet::Odd), 2.0);
        assert_eq!(Roulette::multiplier(17, Color::Black, RouletteBet::Even), 0.0);
        assert_eq!(Roulette::multiplier(17, Color::Black, RouletteBet::Low), 2.0);
        assert_eq!(Roulette::multiplier(17, Color::Black, RouletteBet::High), 0.0);
        assert_eq!(Roulette::multiplier(12, Color::Red, RouletteBet::Red), 2.0);
        assert_eq!(Roulette::multiplier(12, Color::Red, RouletteBet::Black), 0.0);
    }

    #[test]
    fn straight_out_of_range_rejected() {
        let mut game = Roulette::default();
        let err = game
            .spin(&mut rng(), 10.0, RouletteBet::Straight(37))
            .unwrap_err();
        assert!(matches!(err, GameError::StraightOutOfRange(37)));
        assert_eq!(game.balance(), STARTING_BANKROLL);
        assert!(game.session().history().is_empty());
    }

    #[test]
    fn spin_settles_and_logs() {
        let mut game = Roulette::default();
        let mut r = rng();
        let spin = game.spin(&mut r, 10.0, RouletteBet::Red).unwrap();
        assert!(spin.pocket <= HIGHEST_POCKET);
        assert_eq!(spin.color, pocket_color(spin.pocket));
        let expected = STARTING_BANKROLL - 10.0 + spin.result.payout;
        assert_eq!(game.balance(), expected);
        assert_eq!(game.session().history().len(), 1);
    }

    #[test]
    fn payout_matches_outcome_over_many_spins() {
        let mut game = Roulette::with_bankroll(1_000_000.0);
        let mut r = rng();
        for _ in 0..500 {
            let spin = game.spin(&mut r, 1.0, RouletteBet::Odd).unwrap();
            let won = spin.pocket != 0 && spin.pocket % 2 == 1;
            assert_eq!(spin.result.payout, if won { 2.0 } else { 0.0 });
        }
    }
}
