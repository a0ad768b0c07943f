pub mod cards;
pub mod games;
pub mod history;
pub mod session;

pub use cards::{card, deck, hand};

use deck::DeckError;
use session::WagerError;

/// Money is whatever decimal the player typed into the wager box. Balances
/// never go negative because every deduction is validated first.
pub type Currency = f64;
pub type SeqNum = usize;

#[derive(Debug)]
pub enum GameError {
    DeckError(DeckError),
    WagerError(WagerError),
    RoundInProgress,
    NoActiveRound,
    StraightOutOfRange(u8),
    KenoSelectionSize(usize),
    KenoPickOutOfRange(u8),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::DeckError(e) => write!(f, "{}", e),
            GameError::WagerError(e) => write!(f, "{}", e),
            GameError::RoundInProgress => write!(f, "A round is already in progress"),
            GameError::NoActiveRound => write!(f, "There is no round in progress"),
            GameError::StraightOutOfRange(n) => {
                write!(f, "Straight bet must be on 0 through 36, not {}", n)
            }
            GameError::KenoSelectionSize(n) => {
                write!(f, "Pick exactly 10 numbers before drawing (you have {})", n)
            }
            GameError::KenoPickOutOfRange(n) => {
                write!(f, "Keno numbers run 1 through 40; {} is not on the card", n)
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<DeckError> for GameError {
    fn from(e: DeckError) -> Self {
        GameError::DeckError(e)
    }
}

impl From<WagerError> for GameError {
    fn from(e: WagerError) -> Self {
        GameError::WagerError(e)
    }
}
