use std::collections::BTreeSet;
use std::error::Error;
use std::io::{stdin, stdout, BufRead, Write};

use casino_core::deck::DeckSeed;
use casino_core::games::baccarat::{Baccarat, BaccaratBet};
use casino_core::games::blackjack::Blackjack;
use casino_core::games::keno::{Keno, PICKS};
use casino_core::games::plinko::Plinko;
use casino_core::games::roulette::{Roulette, RouletteBet};
use casino_core::games::sicbo::{SicBo, SicBoBet};
use casino_core::games::slots::{SlotConfig, SlotMachine};
use casino_core::Currency;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
    #[structopt(
        long,
        default_value = "blackjack",
        help = "blackjack, roulette, plinko, baccarat, sicbo, keno, or a slot \
                variant: lucky-sevens, fruit-frenzy, pharaohs-gold, cosmic-spin"
    )]
    game: String,
    #[structopt(long, help = "Override the game's default starting balance")]
    bankroll: Option<Currency>,
    #[structopt(long, help = "Deck seed for blackjack; repeats the same shuffle every round")]
    seed: Option<DeckSeed>,
}

enum Table {
    Blackjack(Blackjack),
    Roulette(Roulette),
    Plinko(Plinko),
    Baccarat(Baccarat),
    Slots(SlotMachine),
    SicBo(SicBo),
    Keno(Keno, BTreeSet<u8>),
}

impl Table {
    fn open(name: &str, bankroll: Option<Currency>) -> Result<Self, String> {
        let t = match name {
            "blackjack" => Table::Blackjack(match bankroll {
                Some(b) => Blackjack::with_bankroll(b),
                None => Blackjack::default(),
            }),
            "roulette" => Table::Roulette(match bankroll {
                Some(b) => Roulette::with_bankroll(b),
                None => Roulette::default(),
            }),
            "plinko" => Table::Plinko(match bankroll {
                Some(b) => Plinko::with_bankroll(b),
                None => Plinko::default(),
            }),
            "baccarat" => Table::Baccarat(match bankroll {
                Some(b) => Baccarat::with_bankroll(b),
                None => Baccarat::default(),
            }),
            "sicbo" => Table::SicBo(match bankroll {
                Some(b) => SicBo::with_bankroll(b),
                None => SicBo::default(),
            }),
            "keno" => Table::Keno(
                match bankroll {
                    Some(b) => Keno::with_bankroll(b),
                    None => Keno::default(),
                },
                BTreeSet::new(),
            ),
            other => {
                let config = slot_config(other)?;
                Table::Slots(match bankroll {
                    Some(b) => SlotMachine::with_bankroll(config, b),
                    None => SlotMachine::new(config),
                })
            }
        };
        Ok(t)
    }

    fn balance(&self) -> Currency {
        match self {
            Table::Blackjack(g) => g.balance(),
            Table::Roulette(g) => g.balance(),
            Table::Plinko(g) => g.balance(),
            Table::Baccarat(g) => g.balance(),
            Table::Slots(g) => g.balance(),
            Table::SicBo(g) => g.balance(),
            Table::Keno(g, _) => g.balance(),
        }
    }

    fn print_history(&self) {
        let history = match self {
            Table::Blackjack(g) => g.session().history(),
            Table::Roulette(g) => g.session().history(),
            Table::Plinko(g) => g.session().history(),
            Table::Baccarat(g) => g.session().history(),
            Table::Slots(g) => g.session().history(),
            Table::SicBo(g) => g.session().history(),
            Table::Keno(g, _) => g.session().history(),
        };
        if history.is_empty() {
            println!("No rounds played yet.");
        }
        for entry in history.iter() {
            println!("{}", entry);
        }
    }
}

fn slot_config(name: &str) -> Result<SlotConfig, String> {
    use itertools::Itertools;
    match name {
        "lucky-sevens" => Ok(SlotConfig::lucky_sevens()),
        "fruit-frenzy" => Ok(SlotConfig::fruit_frenzy()),
        "pharaohs-gold" => Ok(SlotConfig::pharaohs_gold()),
        "cosmic-spin" => Ok(SlotConfig::cosmic_spin()),
        _ => Err(format!(
            "Unknown game '{}'. Slot variants are: {}",
            name,
            SlotConfig::all_variants().iter().map(|c| c.name).join(", ")
        )),
    }
}

fn print_help(table: &Table) {
    println!("Common commands: (h)elp, (b)alance, history, (q)uit");
    let game_cmds: &[(&str, &str)] = match table {
        Table::Blackjack(_) => &[
            ("deal X", "Start a round wagering X."),
            ("hit", "Draw another card."),
            ("stand", "Stop and let the dealer play out."),
        ],
        Table::Roulette(_) => &[
            ("red X / black X", "Color bet wagering X."),
            ("odd X / even X", "Parity bet (zero loses)."),
            ("low X / high X", "1-18 or 19-36 (zero loses)."),
            ("straight N X", "Exact pocket N, pays 36x."),
        ],
        Table::Plinko(_) => &[("drop X", "Drop a chip wagering X.")],
        Table::Baccarat(_) => &[
            ("player X", "Back the player hand."),
            ("banker X", "Back the banker hand (pays 1.95x)."),
            ("tie X", "Back a tie (pays 9x)."),
        ],
        Table::Slots(_) => &[("spin X", "Spin the reels wagering X.")],
        Table::SicBo(_) => &[
            ("small X", "Total 4-10, no triple."),
            ("big X", "Total 11-17, no triple."),
            ("triple X", "Any triple, pays 31x."),
        ],
        Table::Keno(_, _) => &[
            ("pick N", "Toggle number N on your ticket."),
            ("ticket", "Show your current picks."),
            ("draw X", "Draw ten balls wagering X (needs 10 picks)."),
        ],
    };
    for (cmds, desc) in game_cmds {
        println!("  {:16}: {}", cmds, desc);
    }
}

fn parse_wager(word: Option<&&str>) -> Result<Currency, Box<dyn Error>> {
    let w = word.ok_or("Missing wager amount")?;
    Ok(w.parse::<Currency>()?)
}

fn show_blackjack(game: &Blackjack, hide_hole: bool) {
    println!("  Your hand:   {} ({})", game.player_hand(), game.player_hand().blackjack_total());
    if hide_hole {
        match game.dealer_upcard() {
            Some(c) => println!("  Dealer shows: ?? {}", c),
            None => println!("  Dealer shows: (nothing)"),
        }
    } else {
        println!("  Dealer hand: {} ({})", game.dealer_hand(), game.dealer_hand().blackjack_total());
    }
}

fn handle(table: &mut Table, words: &[&str], seed: &Option<DeckSeed>) -> Result<(), Box<dyn Error>> {
    match table {
        Table::Blackjack(game) => match words[0] {
            "deal" | "d" => {
                let wager = parse_wager(words.get(1))?;
                let resolved = match seed {
                    Some(s) => game.start_round_seeded(wager, s)?,
                    None => game.start_round(wager)?,
                };
                match resolved {
                    Some(result) => {
                        show_blackjack(game, false);
                        println!("{}", result);
                        game.reset();
                    }
                    None => show_blackjack(game, true),
                }
            }
            "hit" => match game.hit()? {
                Some(result) => {
                    show_blackjack(game, false);
                    println!("{}", result);
                    game.reset();
                }
                None => show_blackjack(game, true),
            },
            "stand" | "s" => {
                let result = game.stand()?;
                show_blackjack(game, false);
                println!("{}", result);
                game.reset();
            }
            _ => return Err("Unknown command; try help".into()),
        },
        Table::Roulette(game) => {
            let bet = match words[0] {
                "red" => RouletteBet::Red,
                "black" => RouletteBet::Black,
                "odd" => RouletteBet::Odd,
                "even" => RouletteBet::Even,
                "low" => RouletteBet::Low,
                "high" => RouletteBet::High,
                "straight" => RouletteBet::Straight(
                    words.get(1).ok_or("Missing pocket number")?.parse()?,
                ),
                _ => return Err("Unknown command; try help".into()),
            };
            let wager_word = if matches!(bet, RouletteBet::Straight(_)) {
                words.get(2)
            } else {
                words.get(1)
            };
            let wager = parse_wager(wager_word)?;
            let spin = game.spin(&mut rand::thread_rng(), wager, bet)?;
            println!("{}", spin.result);
        }
        Table::Plinko(game) => match words[0] {
            "drop" | "d" => {
                let wager = parse_wager(words.get(1))?;
                let drop = game.drop_chip(&mut rand::thread_rng(), wager)?;
                println!("{}", drop.result);
            }
            _ => return Err("Unknown command; try help".into()),
        },
        Table::Baccarat(game) => {
            let bet = match words[0] {
                "player" | "p" => BaccaratBet::Player,
                // no single-letter alias: "b" is the balance command
                "banker" => BaccaratBet::Banker,
                "tie" | "t" => BaccaratBet::Tie,
                _ => return Err("Unknown command; try help".into()),
            };
            let wager = parse_wager(words.get(1))?;
            let round = game.play(wager, bet)?;
            println!("  Player: {} ({})", round.player, round.player_total);
            println!("  Banker: {} ({})", round.banker, round.banker_total);
            println!("{}", round.result);
        }
        Table::Slots(game) => match words[0] {
            "spin" | "s" => {
                let wager = parse_wager(words.get(1))?;
                let pull = game.spin(&mut rand::thread_rng(), wager)?;
                println!("{}", pull.result);
            }
            _ => return Err("Unknown command; try help".into()),
        },
        Table::SicBo(game) => {
            let bet = match words[0] {
                "small" => SicBoBet::Small,
                "big" => SicBoBet::Big,
                "triple" => SicBoBet::Triple,
                _ => return Err("Unknown command; try help".into()),
            };
            let wager = parse_wager(words.get(1))?;
            let roll = game.roll(&mut rand::thread_rng(), wager, bet)?;
            println!("{}", roll.result);
        }
        Table::Keno(game, picks) => match words[0] {
            "pick" | "p" => {
                let n: u8 = words.get(1).ok_or("Missing number")?.parse()?;
                if picks.contains(&n) {
                    picks.remove(&n);
                } else {
                    picks.insert(n);
                }
                println!("Ticket ({} of {}): {:?}", picks.len(), PICKS, picks);
            }
            "ticket" | "t" => {
                println!("Ticket ({} of {}): {:?}", picks.len(), PICKS, picks);
            }
            "draw" | "d" => {
                let wager = parse_wager(words.get(1))?;
                let draw = game.draw(&mut rand::thread_rng(), wager, picks)?;
                println!("  Drawn: {:?}", draw.drawn);
                println!("{}", draw.result);
            }
            _ => return Err("Unknown command; try help".into()),
        },
    }
    println!("Balance: {:.2}", table.balance());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let mut table = Table::open(&opt.game, opt.bankroll).map_err(|e| -> Box<dyn Error> { e.into() })?;
    println!("Welcome to the {} table. Balance: {:.2}", opt.game, table.balance());
    print_help(&table);
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        let n = stdin().lock().read_line(&mut line)?;
        if n == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || line.starts_with('#') {
            continue;
        }
        match words[0] {
            "quit" | "q" => break,
            "help" | "h" => print_help(&table),
            "balance" | "b" => println!("Balance: {:.2}", table.balance()),
            "history" => table.print_history(),
            _ => {
                if let Err(e) = handle(&mut table, &words, &opt.seed) {
                    println!("{}", e);
                }
            }
        }
    }
    println!("You leave the table with {:.2}.", table.balance());
    Ok(())
}
