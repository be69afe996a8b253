use anyhow::Error as Anyhow;
use clap::Parser;
use lib::board::{Board, Reaction};
use lib::chess::{Fen, Position, Square};
use lib::race::Race;
use std::convert::TryInto;
use std::io::{stdin, stdout, Write};
use tracing::instrument;

/// Race through a puzzle by tapping squares.
///
/// Reads one square per line in algebraic notation; the first tap selects a
/// piece, a second tap on a legal destination moves it.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The position the puzzle starts from.
    #[clap(short, long, default_value_t = Fen::default())]
    fen: Fen,

    /// The puzzle objective shown to the player.
    #[clap(short, long, default_value = "checkmate your opponent")]
    objective: String,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            fen: Fen::default(),
            objective: String::from("checkmate your opponent"),
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let position: Position = self.fen.try_into()?;
        let mut race = Race::new(position.turn(), self.objective);
        let mut board = Board::new(position);
        race.start();

        println!("{}", board.placement());
        println!("objective: {}", race.objective());

        let mut lines = stdin().lines();
        while race.accepts_input() {
            print!("{} to move > ", board.turn());
            stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            let square: Square = match line.trim().parse() {
                Ok(square) => square,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };

            match board.tap(square) {
                Reaction::Ignored => {}
                Reaction::Deselected => println!("deselected"),

                Reaction::Selected(s) => {
                    let whithers = board
                        .selection()
                        .destinations()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>();

                    println!("selected {}; may move to: {}", s, whithers.join(" "));
                }

                Reaction::Moved(m) => {
                    race.turn_completed(board.outcome());
                    println!("played {}", m);
                    println!("{}", board.placement());

                    if let Some(k) = board.checked_king() {
                        println!("check on {}", k);
                    }
                }
            }
        }

        if let (Some(o), Some(v)) = (board.outcome(), race.verdict()) {
            println!(
                "{}; {} after {} moves in {:.1?}",
                o,
                v,
                race.moves(),
                race.elapsed()
            );
        }

        Ok(())
    }
}
