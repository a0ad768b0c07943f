pub mod baccarat;
pub mod blackjack;
pub mod keno;
pub mod plinko;
pub mod roulette;
pub mod sicbo;
pub mod slots;

use serde::{Deserialize, Serialize};

use crate::Currency;

/// The terminal artifact of one round: how much comes back to the balance and
/// the line the UI shows for it. Zero payout means the wager was lost; a
/// payout equal to the wager is a push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub payout: Currency,
    pub message: String,
}

impl RoundResult {
    pub fn new(payout: Currency, message: String) -> Self {
        Self { payout, message }
    }

    pub fn is_win(&self) -> bool {
        self.payout > 0.0
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
