use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, DeckSeed, Hand};
use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 1000.0;
const TWENTY_ONE: u8 = 21;
const DEALER_STANDS_AT: u8 = 17;
/// A natural 21 on the deal pays 2.5x; any other win pays 2x.
const BLACKJACK_PAYS: Currency = 2.5;
const WIN_PAYS: Currency = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize, Deserialize)]
pub enum State {
    Idle,
    Dealt,
    PlayerActing,
    Resolved,
}

impl Default for State {
    fn default() -> Self {
        Self::Idle
    }
}

/// One blackjack table: a fresh 52-card deck per round, a player hand, a
/// dealer hand whose hole card stays hidden until the stand, and the session
/// ledger the round settles into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blackjack {
    state: State,
    deck: Deck,
    player: Hand,
    dealer: Hand,
    wager: Currency,
    session: Session,
}

impl Default for Blackjack {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl Blackjack {
    pub fn with_bankroll(bankroll: Currency) -> Self {
        Self {
            state: State::Idle,
            deck: Deck::default(),
            player: Hand::new(),
            dealer: Hand::new(),
            wager: 0.0,
            session: Session::new(bankroll),
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn balance(&self) -> Currency {
        self.session.balance()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// The full dealer hand. Renderers should hide the hole card while the
    /// round is still open; see `dealer_upcard`.
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// The dealer's visible card while the hole card (dealt first) is hidden.
    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.cards().get(1).copied()
    }

    /// Deal a new round with a randomly shuffled deck.
    pub fn start_round(&mut self, wager: Currency) -> Result<Option<RoundResult>, GameError> {
        self.start_round_seeded(wager, &DeckSeed::default())
    }

    /// Deal a new round with a reproducible shuffle.
    ///
    /// Returns `Some` if the round resolved on the deal (either side had a
    /// natural 21), `None` if the player now acts.
    pub fn start_round_seeded(
        &mut self,
        wager: Currency,
        seed: &DeckSeed,
    ) -> Result<Option<RoundResult>, GameError> {
        self.begin(wager, Deck::new(seed))
    }

    /// Deal from a rigged deck. Test rigging only.
    #[cfg(test)]
    pub fn start_round_stacked(
        &mut self,
        wager: Currency,
        cards: Vec<Card>,
    ) -> Result<Option<RoundResult>, GameError> {
        self.begin(wager, Deck::stacked(cards))
    }

    fn begin(&mut self, wager: Currency, deck: Deck) -> Result<Option<RoundResult>, GameError> {
        if matches!(self.state, State::Dealt | State::PlayerActing) {
            return Err(GameError::RoundInProgress);
        }
        self.session.place_wager(wager)?;
        self.deck = deck;
        self.player.clear();
        self.dealer.clear();
        self.wager = wager;
        for _ in 0..2 {
            let c = self.deck.draw()?;
            self.player.push(c);
            let c = self.deck.draw()?;
            self.dealer.push(c);
        }
        if self.player.blackjack_total() == TWENTY_ONE {
            let payout = wager * BLACKJACK_PAYS;
            let msg = format!("Blackjack! You win {:.2}!", payout);
            return Ok(Some(self.resolve(payout, msg)));
        }
        if self.dealer.blackjack_total() == TWENTY_ONE {
            let msg = "Dealer has blackjack. You lose.".to_string();
            return Ok(Some(self.resolve(0.0, msg)));
        }
        self.state = State::Dealt;
        Ok(None)
    }

    /// Draw one card to the player's hand. Resolves the round immediately if
    /// the player busts.
    pub fn hit(&mut self) -> Result<Option<RoundResult>, GameError> {
        if !matches!(self.state, State::Dealt | State::PlayerActing) {
            return Err(GameError::NoActiveRound);
        }
        let c = self.deck.draw()?;
        self.player.push(c);
        let total = self.player.blackjack_total();
        if total > TWENTY_ONE {
            let msg = format!("Bust with {}. You lose.", total);
            return Ok(Some(self.resolve(0.0, msg)));
        }
        self.state = State::PlayerActing;
        Ok(None)
    }

    /// Reveal the dealer's hand, run the dealer out (hits below 17, no
    /// soft-17 distinction), and settle the round.
    pub fn stand(&mut self) -> Result<RoundResult, GameError> {
        if !matches!(self.state, State::Dealt | State::PlayerActing) {
            return Err(GameError::NoActiveRound);
        }
        while self.dealer.blackjack_total() < DEALER_STANDS_AT {
            let c = self.deck.draw()?;
            self.dealer.push(c);
        }
        let player_total = self.player.blackjack_total();
        let dealer_total = self.dealer.blackjack_total();
        let result = if dealer_total > TWENTY_ONE {
            let payout = self.wager * WIN_PAYS;
            self.resolve(
                payout,
                format!("Dealer busts with {}. You win {:.2}!", dealer_total, payout),
            )
        } else if dealer_total > player_total {
            self.resolve(
                0.0,
                format!("Dealer wins {} to {}. You lose.", dealer_total, player_total),
            )
        } else if player_total > dealer_total {
            let payout = self.wager * WIN_PAYS;
            self.resolve(
                payout,
                format!(
                    "You win {} to {}! Paid {:.2}.",
                    player_total, dealer_total, payout
                ),
            )
        } else {
            let payout = self.wager;
            self.resolve(payout, format!("Push at {}. Wager returned.", player_total))
        };
        Ok(result)
    }

    /// Clear the table for the next round. The balance carries over.
    pub fn reset(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.wager = 0.0;
        self.state = State::Idle;
    }

    fn resolve(&mut self, payout: Currency, message: String) -> RoundResult {
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        self.state = State::Resolved;
        result
    }
}
