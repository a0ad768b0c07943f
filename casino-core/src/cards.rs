pub mod card;
pub mod deck;
pub mod hand;

pub use card::Card;
pub use deck::{Deck, DeckSeed};
pub use hand::Hand;
