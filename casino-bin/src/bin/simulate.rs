use std::collections::BTreeSet;
use std::error::Error;

use casino_core::deck::DeckSeed;
use casino_core::games::baccarat::{Baccarat, BaccaratBet};
use casino_core::games::blackjack::Blackjack;
use casino_core::games::keno::Keno;
use casino_core::games::plinko::Plinko;
use casino_core::games::roulette::{Roulette, RouletteBet};
use casino_core::games::sicbo::{SicBo, SicBoBet};
use casino_core::games::slots::{SlotConfig, SlotMachine};
use casino_core::Currency;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use structopt::StructOpt;

/// Run a game's outcome engine for many rounds and report the observed
/// return-to-player. Handy for eyeballing that a paytable tweak did what you
/// thought it did.
#[derive(StructOpt)]
struct Opt {
    #[structopt(
        long,
        default_value = "roulette",
        help = "blackjack, roulette, plinko, baccarat, sicbo, keno, or a slot \
                variant: lucky-sevens, fruit-frenzy, pharaohs-gold, cosmic-spin"
    )]
    game: String,
    #[structopt(long, default_value = "10000")]
    rounds: u64,
    #[structopt(long, default_value = "1")]
    wager: Currency,
    #[structopt(long, help = "RNG seed for a reproducible run")]
    seed: Option<u64>,
}

struct Tally {
    rounds: u64,
    wins: u64,
    wagered: Currency,
    returned: Currency,
}

impl Tally {
    fn new() -> Self {
        Tally {
            rounds: 0,
            wins: 0,
            wagered: 0.0,
            returned: 0.0,
        }
    }

    fn record(&mut self, wager: Currency, payout: Currency) {
        self.rounds += 1;
        if payout > 0.0 {
            self.wins += 1;
        }
        self.wagered += wager;
        self.returned += payout;
    }

    fn print(&self, game: &str) {
        println!("game      {}", game);
        println!("rounds    {}", self.rounds);
        println!(
            "wins      {} ({:.1}%)",
            self.wins,
            100.0 * self.wins as f64 / self.rounds as f64
        );
        println!("wagered   {:.2}", self.wagered);
        println!("returned  {:.2}", self.returned);
        println!("rtp       {:.2}%", 100.0 * self.returned / self.wagered);
    }
}

fn deck_seed<R: RngCore>(rng: &mut R) -> DeckSeed {
    let mut b = [0u8; 32];
    rng.fill_bytes(&mut b);
    DeckSeed::new(b)
}

/// Dealer-mimic strategy: hit below 17, then stand.
fn blackjack_round(
    game: &mut Blackjack,
    rng: &mut ChaChaRng,
    wager: Currency,
) -> Result<Currency, Box<dyn Error>> {
    let seed = deck_seed(rng);
    if let Some(result) = game.start_round_seeded(wager, &seed)? {
        game.reset();
        return Ok(result.payout);
    }
    while game.player_hand().blackjack_total() < 17 {
        if let Some(result) = game.hit()? {
            game.reset();
            return Ok(result.payout);
        }
    }
    let result = game.stand()?;
    game.reset();
    Ok(result.payout)
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let mut rng = match opt.seed {
        Some(s) => ChaChaRng::seed_from_u64(s),
        None => ChaChaRng::from_entropy(),
    };
    // A bankroll no run can exhaust, so the ledger never rejects a round.
    let bankroll = opt.wager * opt.rounds as Currency + 1.0;
    let mut tally = Tally::new();
    match opt.game.as_str() {
        "blackjack" => {
            let mut game = Blackjack::with_bankroll(bankroll);
            for _ in 0..opt.rounds {
                let payout = blackjack_round(&mut game, &mut rng, opt.wager)?;
                tally.record(opt.wager, payout);
            }
        }
        "roulette" => {
            let mut game = Roulette::with_bankroll(bankroll);
            let bets = [
                RouletteBet::Red,
                RouletteBet::Black,
                RouletteBet::Odd,
                RouletteBet::Even,
                RouletteBet::Low,
                RouletteBet::High,
            ];
            for _ in 0..opt.rounds {
                let bet = bets[rng.gen_range(0..bets.len())];
                let spin = game.spin(&mut rng, opt.wager, bet)?;
                tally.record(opt.wager, spin.result.payout);
            }
        }
        "plinko" => {
            let mut game = Plinko::with_bankroll(bankroll);
            for _ in 0..opt.rounds {
                let drop = game.drop_chip(&mut rng, opt.wager)?;
                tally.record(opt.wager, drop.result.payout);
            }
        }
        "baccarat" => {
            let mut game = Baccarat::with_bankroll(bankroll);
            for _ in 0..opt.rounds {
                let round = game.play(opt.wager, BaccaratBet::Player)?;
                tally.record(opt.wager, round.result.payout);
            }
        }
        "sicbo" => {
            let mut game = SicBo::with_bankroll(bankroll);
            let bets = [SicBoBet::Small, SicBoBet::Big, SicBoBet::Triple];
            for _ in 0..opt.rounds {
                let bet = bets[rng.gen_range(0..bets.len())];
                let roll = game.roll(&mut rng, opt.wager, bet)?;
                tally.record(opt.wager, roll.result.payout);
            }
        }
        "keno" => {
            let mut game = Keno::with_bankroll(bankroll);
            let picks: BTreeSet<u8> = (1..=10).collect();
            for _ in 0..opt.rounds {
                let draw = game.draw(&mut rng, opt.wager, &picks)?;
                tally.record(opt.wager, draw.result.payout);
            }
        }
        other => {
            let config = match other {
                "lucky-sevens" => SlotConfig::lucky_sevens(),
                "fruit-frenzy" => SlotConfig::fruit_frenzy(),
                "pharaohs-gold" => SlotConfig::pharaohs_gold(),
                "cosmic-spin" => SlotConfig::cosmic_spin(),
                _ => return Err(format!("Unknown game '{}'", other).into()),
            };
            let mut game = SlotMachine::with_bankroll(config, bankroll);
            for _ in 0..opt.rounds {
                let pull = game.spin(&mut rng, opt.wager)?;
                tally.record(opt.wager, pull.result.payout);
            }
        }
    }
    tally.print(&opt.game);
    Ok(())
}
