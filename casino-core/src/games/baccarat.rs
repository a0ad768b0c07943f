use serde::{Deserialize, Serialize};

use crate::cards::{Deck, DeckSeed, Hand};
use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 750.0;
pub const SHOE_DECKS: usize = 8;
/// The shoe is rebuilt and reshuffled before a round once this few cards remain.
pub const RESHUFFLE_AT: usize = 6;

const PLAYER_PAYS: Currency = 2.0;
const BANKER_PAYS: Currency = 1.95;
const TIE_PAYS: Currency = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaccaratBet {
    Player,
    Banker,
    Tie,
}

impl std::fmt::Display for BaccaratBet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaccaratBet::Player => write!(f, "player"),
            BaccaratBet::Banker => write!(f, "banker"),
            BaccaratBet::Tie => write!(f, "tie"),
        }
    }
}

/// Both final hands and totals, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub player: Hand,
    pub banker: Hand,
    pub player_total: u8,
    pub banker_total: u8,
    pub result: RoundResult,
}

/// A baccarat table with an eight-deck shoe carried across rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baccarat {
    shoe: Deck,
    session: Session,
}

impl Default for Baccarat {
    fn default() -> Self {
        Self::with_bankroll(STARTING_BANKROLL)
    }
}

impl Baccarat {
    pub fn with_bankroll(bankroll: Currency) -> Self {
        Self {
            shoe: Deck::shoe(SHOE_DECKS, &DeckSeed::default()),
            session: Session::new(bankroll),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn balance(&self) -> Currency {
        self.session.balance()
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Swap in a rigged shoe. Test rigging only. The rig is padded with
    /// filler cards underneath so the low-shoe reshuffle in `play` doesn't
    /// throw it away; the filler is never reached within one round.
    #[cfg(test)]
    pub fn stack_shoe(&mut self, cards: Vec<crate::cards::Card>) {
        use crate::cards::card::{Rank, Suit};
        let mut cards = cards;
        cards.extend(std::iter::repeat(crate::cards::Card::new(Rank::Two, Suit::Club)).take(RESHUFFLE_AT + 1));
        self.shoe = Deck::stacked(cards);
    }

    /// Play one coup: two cards each, third cards by the tableau, highest
    /// mod-10 total wins.
    pub fn play(&mut self, wager: Currency, bet: BaccaratBet) -> Result<Round, GameError> {
        self.session.place_wager(wager)?;
        if self.shoe.remaining() <= RESHUFFLE_AT {
            self.shoe = Deck::shoe(SHOE_DECKS, &DeckSeed::default());
        }
        let mut player = Hand::new();
        let mut banker = Hand::new();
        for _ in 0..2 {
            player.push(self.shoe.draw()?);
            banker.push(self.shoe.draw()?);
        }
        let mut player_third = None;
        if player.baccarat_total() <= 5 {
            let c = self.shoe.draw()?;
            player.push(c);
            player_third = Some(c.rank.baccarat_value());
        }
        if banker_draws(banker.baccarat_total(), player_third) {
            banker.push(self.shoe.draw()?);
        }
        let player_total = player.baccarat_total();
        let banker_total = banker.baccarat_total();
        let result = Self::settle_round(wager, bet, player_total, banker_total);
        self.session.settle(&result);
        Ok(Round {
            player,
            banker,
            player_total,
            banker_total,
            result,
        })
    }

    fn settle_round(
        wager: Currency,
        bet: BaccaratBet,
        player_total: u8,
        banker_total: u8,
    ) -> RoundResult {
        if player_total == banker_total {
            return if bet == BaccaratBet::Tie {
                let payout = wager * TIE_PAYS;
                RoundResult::new(payout, format!("Tie at {}. You win {:.2}!", player_total, payout))
            } else {
                // House rule here: a tie pushes player/banker bets rather than
                // taking them.
                RoundResult::new(
                    wager,
                    format!("Tie at {}. Your wager is returned.", player_total),
                )
            };
        }
        let (winner, winner_total, loser_total) = if player_total > banker_total {
            (BaccaratBet::Player, player_total, banker_total)
        } else {
            (BaccaratBet::Banker, banker_total, player_total)
        };
        if bet == winner {
            let payout = wager
                * match winner {
                    BaccaratBet::Player => PLAYER_PAYS,
                    BaccaratBet::Banker => BANKER_PAYS,
                    BaccaratBet::Tie => unreachable!(),
                };
            RoundResult::new(
                payout,
                format!(
                    "{} wins {} to {}. You win {:.2}!",
                    capitalized(winner),
                    winner_total,
                    loser_total,
                    payout
                ),
            )
        } else {
            RoundResult::new(
                0.0,
                format!(
                    "{} wins {} to {}. You lose.",
                    capitalized(winner),
                    winner_total,
                    loser_total
                ),
            )
        }
    }
}

fn capitalized(bet: BaccaratBet) -> &'static str {
    match bet {
        BaccaratBet::Player => "Player",
        BaccaratBet::Banker => "Banker",
        BaccaratBet::Tie => "Tie",
    }
}

/// The standard banker third-card tableau. `player_third` is the baccarat
/// value of the player's third card, or `None` if the player stood.
pub fn banker_draws(banker_total: u8, player_third: Option<u8>) -> bool {
    match player_third {
        None => banker_total <= 5,
        Some(v) => match banker_total {
            0..=2 => true,
            3 => v != 8,
            4 => (2..=7).contains(&v),
            5 => (4..=7).contains(&v),
            6 => v == 6 || v == 7,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::cards_from_str;

    fn game() -> Baccarat {
        Baccarat::default()
    }

    #[test]
    fn tableau_without_player_third() {
        for total in 0..=5 {
            assert!(banker_draws(total, None));
        }
        for total in 6..=9 {
            assert!(!banker_draws(total, None));
        }
    }

    #[test]
    fn tableau_with_player_third() {
        for v in 0..=9 {
            assert!(banker_draws(0, Some(v)));
            assert!(banker_draws(2, Some(v)));
            assert!(!banker_draws(7, Some(v)));
            assert!(!banker_draws(9, Some(v)));
        }
        assert!(banker_draws(3, Some(7)));
        assert!(!banker_draws(3, Some(8)));
        assert!(banker_draws(3, Some(9)));
        assert!(banker_draws(4, Some(2)));
        assert!(banker_draws(4, Some(7)));
        assert!(!banker_draws(4, Some(1)));
        assert!(!banker_draws(4, Some(8)));
        assert!(banker_draws(5, Some(4)));
        assert!(banker_draws(5, Some(7)));
        assert!(!banker_draws(5, Some(3)));
        assert!(!banker_draws(5, Some(8)));
        assert!(banker_draws(6, Some(6)));
        assert!(banker_draws(6, Some(7)));
        assert!(!banker_draws(6, Some(5)));
        assert!(!banker_draws(6, Some(8)));
    }

    /// Player 8+7 totals 5 and must draw a third card.
    #[test]
    fn player_draws_at_five() {
        let mut g = game();
        // Deal order alternates player/banker: player 8h 7d, banker Kh Qd.
        // Player total 5 -> draws 2c (total 7). Banker 0 -> always draws: 4s.
        g.stack_shoe(cards_from_str("8hKh7dQd2c4s"));
        let round = g.play(10.0, BaccaratBet::Player).unwrap();
        assert_eq!(round.player.len(), 3);
        assert_eq!(round.player_total, 7);
        assert_eq!(round.banker_total, 4);
        assert_eq!(round.result.payout, 20.0);
    }

    #[test]
    fn player_stands_at_six() {
        let mut g = game();
        // Player 4h 2d = 6: stands. Banker Kh 3d = 3, no player third ->
        // draws (<=5): Th, still 3.
        g.stack_shoe(cards_from_str("4hKh2d3dTh"));
        let round = g.play(10.0, BaccaratBet::Banker).unwrap();
        assert_eq!(round.player.len(), 2);
        assert_eq!(round.banker.len(), 3);
        assert_eq!(round.player_total, 6);
        assert_eq!(round.banker_total, 3);
        assert_eq!(round.result.payout, 0.0);
    }

    #[test]
    fn banker_win_pays_one_point_ninety_five() {
        let mut g = game();
        // Player Kh Qd = 0 -> third 2c = 2. Banker 5h 4d = 9: stands (7+).
        g.stack_shoe(cards_from_str("Kh5hQd4d2c"));
        let round = g.play(100.0, BaccaratBet::Banker).unwrap();
        assert_eq!(round.banker_total, 9);
        assert_eq!(round.player_total, 2);
        // 1.95 is not exactly representable, so compare with a tolerance.
        assert!((round.result.payout - 195.0).abs() < 1e-9);
    }

    #[test]
    fn tie_bet_pays_nine() {
        let mut g = game();
        // Player 9h Kd = 9 stands; banker 9s Qh = 9 stands. Tie.
        g.stack_shoe(cards_from_str("9h9sKdQh"));
        let round = g.play(10.0, BaccaratBet::Tie).unwrap();
        assert_eq!(round.player_total, round.banker_total);
        assert_eq!(round.result.payout, 90.0);
    }

    #[test]
    fn tie_pushes_non_tie_bets() {
        let mut g = game();
        g.stack_shoe(cards_from_str("9h9sKdQh"));
        let round = g.play(10.0, BaccaratBet::Player).unwrap();
        assert_eq!(round.result.payout, 10.0);
        assert_eq!(g.balance(), STARTING_BANKROLL);
    }

    #[test]
    fn totals_always_mod_ten() {
        let mut g = Baccarat::with_bankroll(1_000_000.0);
        for _ in 0..200 {
            let round = g.play(1.0, BaccaratBet::Player).unwrap();
            assert!(round.player_total <= 9);
            assert!(round.banker_total <= 9);
        }
    }

    #[test]
    fn shoe_reshuffles_when_low() {
        let mut g = game();
        // Run the shoe down close to empty.
        while g.shoe_remaining() > RESHUFFLE_AT + 12 {
            let _ = g.play(0.01, BaccaratBet::Player).unwrap();
        }
        while g.shoe_remaining() > RESHUFFLE_AT {
            match g.play(0.01, BaccaratBet::Player) {
                Ok(_) => {}
                Err(e) => panic!("shoe ran dry: {}", e),
            }
        }
        // Next round must rebuild the shoe before drawing.
        let before = g.shoe_remaining();
        assert!(before <= RESHUFFLE_AT);
        let _ = g.play(0.01, BaccaratBet::Player).unwrap();
        assert!(g.shoe_remaining() > before);
    }

    #[test]
    fn invalid_wager_rejected() {
        let mut g = game();
        assert!(g.play(f64::NAN, BaccaratBet::Player).is_err());
        assert!(g.play(STARTING_BANKROLL + 1.0, BaccaratBet::Player).is_err());
        assert_eq!(g.balance(), STARTING_BANKROLL);
    }
}
