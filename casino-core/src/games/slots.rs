use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::games::RoundResult;
use crate::session::Session;
use crate::{Currency, GameError};

pub const STARTING_BANKROLL: Currency = 800.0;
pub const REELS: usize = 5;

pub type Symbol = &'static str;

/// One slot variant: its symbol universe, optional wild, and the paytable
/// keyed by match-run length. Validated at construction; every reachable run
/// length either hits the table or pays nothing. Serialize-only because the
/// tables are baked-in statics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotConfig {
    pub name: &'static str,
    symbols: &'static [Symbol],
    wild: Option<Symbol>,
    paytable: &'static [(usize, Currency)],
}

impl SlotConfig {
    fn new(
        name: &'static str,
        symbols: &'static [Symbol],
        wild: Option<Symbol>,
        paytable: &'static [(usize, Currency)],
    ) -> Self {
        assert!(!symbols.is_empty());
        if let Some(w) = wild {
            assert!(symbols.contains(&w), "wild must be in the symbol set");
        }
        for (run, mult) in paytable {
            assert!((3..=REELS).contains(run));
            assert!(*mult >= 0.0);
        }
        Self {
            name,
            symbols,
            wild,
            paytable,
        }
    }

    pub fn symbols(&self) -> &'static [Symbol] {
        self.symbols
    }

    pub fn wild(&self) -> Option<Symbol> {
        self.wild
    }

    pub fn multiplier(&self, run: usize) -> Option<Currency> {
        self.paytable
            .iter()
            .find(|(r, _)| *r == run)
            .map(|(_, m)| *m)
    }

    /// Straight fruit machine, no wild.
    pub fn lucky_sevens() -> Self {
        Self::new(
            "Lucky Sevens",
            &["7", "BAR", "🍒", "🔔", "💎", "⭐"],
            None,
            &[(3, 5.0), (4, 20.0), (5, 100.0)],
        )
    }

    /// The joker substitutes for any fruit.
    pub fn fruit_frenzy() -> Self {
        Self::new(
            "Fruit Frenzy",
            &["🍒", "🍋", "🍇", "🍉", "🍊", "🃏"],
            Some("🃏"),
            &[(3, 4.0), (4, 15.0), (5, 75.0)],
        )
    }

    /// The crown is wild.
    pub fn pharaohs_gold() -> Self {
        Self::new(
            "Pharaoh's Gold",
            &["🐫", "🏺", "👑", "🦂", "🐍", "🌴"],
            Some("👑"),
            &[(3, 6.0), (4, 25.0), (5, 150.0)],
        )
    }

    /// The star is wild.
    pub fn cosmic_spin() -> Self {
        Self::new(
            "Cosmic Spin",
            &["🚀", "🪐", "⭐", "👽", "🌙", "☄️"],
            Some("⭐"),
            &[(3, 3.0), (4, 12.0), (5, 60.0)],
        )
    }

    pub fn all_variants() -> [Self; 4] {
        [
            Self::lucky_sevens(),
            Self::fruit_frenzy(),
            Self::pharaohs_gold(),
            Self::cosmic_spin(),
        ]
    }
}

/// Count consecutive reels from the left that pay as one line: each symbol
/// after the first matches if it equals the first or if either of the pair is
/// the wild. The run stops at the first symbol that is neither.
pub fn match_run(line: &[Symbol], wild: Option<Symbol>) -> usize {
    let first = line[0];
    let mut run = 1;
    for &s in &line[1..] {
        if s == first || Some(s) == wild || Some(first) == wild {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// One pull of the handle, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pull {
    pub line: Vec<Symbol>,
    pub run: usize,
    pub result: RoundResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotMachine {
    config: SlotConfig,
    session: Session,
}

impl SlotMachine {
    pub fn new(config: SlotConfig) -> Self {
        Self::with_bankroll(config, STARTING_BANKROLL)
    }

    pub fn with_bankroll(config: SlotConfig, bankroll: Currency) -> Self {
        Self {
            config,
            session: Session::new(bankroll),
        }
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn balance(&self) -> Currency {
        self.session.balance()
    }

    pub fn spin<R: Rng>(&mut self, rng: &mut R, wager: Currency) -> Result<Pull, GameError> {
        self.session.place_wager(wager)?;
        let line: Vec<Symbol> = (0..REELS)
            .map(|_| *self.config.symbols.choose(rng).expect("non-empty symbol set"))
            .collect();
        let run = match_run(&line, self.config.wild);
        let payout = wager * self.config.multiplier(run).unwrap_or(0.0);
        let shown = line.join(" ");
        let message = if payout > 0.0 {
            format!("[ {} ] {} in a row pays {:.2}!", shown, run, payout)
        } else {
            format!("[ {} ] No win this spin.", shown)
        };
        let result = RoundResult::new(payout, message);
        self.session.settle(&result);
        Ok(Pull { line, run, result })
    }
}
