use serde::{Deserialize, Serialize};

use crate::games::RoundResult;
use crate::history::History;
use crate::Currency;

#[derive(Debug, PartialEq)]
pub enum WagerError {
    NotANumber,
    NotPositive,
    ExceedsBalance,
}

impl std::error::Error for WagerError {}

impl std::fmt::Display for WagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WagerError::NotANumber => write!(f, "Enter a valid wager amount"),
            WagerError::NotPositive => write!(f, "Wager must be greater than zero"),
            WagerError::ExceedsBalance => write!(f, "Wager exceeds your balance"),
        }
    }
}

/// The per-page ledger: a running balance and the round history. One session
/// belongs to one engine instance and lives until the page reloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    balance: Currency,
    history: History,
}

impl Session {
    pub fn new(bankroll: Currency) -> Self {
        Self {
            balance: bankroll,
            history: History::default(),
        }
    }

    pub fn balance(&self) -> Currency {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Check a wager without touching the balance.
    pub fn validate_wager(&self, amount: Currency) -> Result<(), WagerError> {
        if !amount.is_finite() {
            Err(WagerError::NotANumber)
        } else if amount <= 0.0 {
            Err(WagerError::NotPositive)
        } else if amount > self.balance {
            Err(WagerError::ExceedsBalance)
        } else {
            Ok(())
        }
    }

    /// Validate and deduct a wager at round start. On error nothing changes.
    pub fn place_wager(&mut self, amount: Currency) -> Result<(), WagerError> {
        self.validate_wager(amount)?;
        self.balance -= amount;
        Ok(())
    }

    /// Credit a settled round and append it to the history log. The only two
    /// side effects a round is allowed to have.
    pub fn settle(&mut self, result: &RoundResult) {
        self.balance += result.payout;
        self.history.push(result.message.clone());
    }
}
