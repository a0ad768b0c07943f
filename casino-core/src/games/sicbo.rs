use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 500.0;

const SMALL_BIG_PAYS: Currency = 2.0;
const TRIPLE_PAYS: Currency = 31.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SicBoBet {
    /// Total 4-10 and not a triple.
    Small,
    /// Total 11-17 and not a triple.
    Big,
    /// Any triple, regardless of value.
    Triple,
}

impl std::fmt::Display for SicBoBet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SicBoBet::Small => write!(f, "small"),
            SicBoBet::Big => write!(f, "big"),
            SicBoBet::Triple => write!(f, "triple"),
        }
    }
}

/// One shake of the cage, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    pub dice: [u8; 3],
    pub total: u8,
    pub triple: bool,
    pub result: RoundResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SicBo {
    session: Session,
}

impl Default for SicBo {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl SicBo {
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

    pub fn roll<R: Rng>(
        &mut self,
        rng: &mut R,
        wager: Currency,
        bet: SicBoBet,
    ) -> Result<Roll, GameError> {
        self.session.place_wager(wager)?;
        let dice = [
            rng.gen_range(1..=6),
            rng.gen_range(1..=6),
            rng.gen_range(1..=6),
        ];
        let total = dice.iter().sum();
        let triple = dice[0] == dice[1] && dice[1] == dice[2];
        let multiplier = Self::multiplier(total, triple, bet);
        let payout = wager * multiplier;
        let message = if payout > 0.0 {
            format!(
                "Dice {} {} {} total {}. Your {} bet wins {:.2}!",
                dice[0], dice[1], dice[2], total, bet, payout
            )
        } else {
            format!(
                "Dice {} {} {} total {}. Your {} bet loses.",
                dice[0], dice[1], dice[2], total, bet
            )
        };
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        Ok(Roll {
            dice,
            total,
            triple,
            result,
        })
    }

    /// Any triple kills small and big, whatever the total.
    fn multiplier(total: u8, triple: bool, bet: SicBoBet) -> Currency {
        match bet {
            SicBoBet::Small if !triple && (4..=10).contains(&total) => SMALL_BIG_PAYS,
            SicBoBet::Big if !triple && (11..=17).contains(&total) => SMALL_BIG_PAYS,
            SicBoBet::Triple if triple => TRIPLE_PAYS,
            _ => 0.0,
        }
    }
}
