use std::io::{self, Write};

use rps_game::{Outcome, Round, Symbol};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREY: &str = "\x1b[90m";

fn symbol_color(symbol: Symbol) -> &'static str {
    match symbol {
        Symbol::Scissors => RED,
        Symbol::Rock => YELLOW,
        Symbol::Paper => GREEN,
    }
}

fn or_none(symbol: Option<Symbol>) -> String {
    match symbol {
        Some(symbol) => symbol.to_string(),
        None => String::from("none"),
    }
}

/// Terminal rendition of the game board
pub struct Display<W: Write> {
    out: W,
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Board before the first round or right after a restart
    pub fn render_idle(&mut self) -> io::Result<()> {
        self.render(None, None, None, 0.0)
    }

    pub fn render_round(&mut self, round: &Round) -> io::Result<()> {
        self.render(
            Some(round.user),
            Some(round.opponent),
            Some(round.outcome),
            round.score.win_rate(),
        )
    }

    fn render(
        &mut self,
        user: Option<Symbol>,
        cpu: Option<Symbol>,
        outcome: Option<Outcome>,
        win_rate: f64,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        self.canvas(user)?;
        writeln!(self.out, "{}User: {}{}", RED, or_none(user), RESET)?;
        writeln!(self.out, "{}CPU: {}{}", BLUE, or_none(cpu), RESET)?;
        match outcome {
            Some(outcome) => writeln!(self.out, "Result: {}", outcome)?,
            None => writeln!(self.out, "Result: ")?,
        }
        writeln!(self.out, "{}Win rate: {:.1}%{}", GREEN, win_rate, RESET)?;
        self.out.flush()
    }

    // Highlights the chosen symbol, greys out the rest
    fn canvas(&mut self, chosen: Option<Symbol>) -> io::Result<()> {
        let cells: Vec<String> = Symbol::ALL
            .iter()
            .map(|symbol| {
                let color = if chosen == Some(*symbol) {
                    symbol_color(*symbol)
                } else {
                    GREY
                };
                format!("{}[{}]{}", color, symbol, RESET)
            })
            .collect();
        writeln!(self.out, "  {}", cells.join("  "))
    }

    pub fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        writeln!(self.out, "  scissors | s    play scissors")?;
        writeln!(self.out, "  rock     | r    play rock")?;
        writeln!(self.out, "  paper    | p    play paper")?;
        writeln!(self.out, "  restart         clear the score")?;
        writeln!(self.out, "  quit     | q    leave the game")?;
        self.out.flush()
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}! {}{}", RED, msg, RESET)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_game::ScoreBoard;

    fn text(display: &Display<Vec<u8>>) -> String {
        String::from_utf8(display.get_ref().clone()).unwrap()
    }

    #[test]
    fn idle_board() {
        let mut display = Display::new(Vec::new());
        display.render_idle().unwrap();
        let out = text(&display);

        assert!(out.contains("User: none"));
        assert!(out.contains("CPU: none"));
        assert!(out.contains("Result: \n"));
        assert!(out.contains("Win rate: 0.0%"));
        assert!(!out.contains(&format!("{}[Scissors]", RED)));
        assert!(out.contains(&format!("{}[Rock]", GREY)));
    }

    #[test]
    fn round_board() {
        let mut display = Display::new(Vec::new());
        let round = Round {
            user: Symbol::Scissors,
            opponent: Symbol::Paper,
            outcome: Outcome::Win,
            score: ScoreBoard {
                wins: 1,
                losses: 1,
                draws: 1,
            },
        };
        display.render_round(&round).unwrap();
        let out = text(&display);

        assert!(out.contains("User: Scissors"));
        assert!(out.contains("CPU: Paper"));
        assert!(out.contains("Result: You win!"));
        assert!(out.contains("Win rate: 33.3%"));
        assert!(out.contains(&format!("{}[Scissors]", RED)));
        assert!(out.contains(&format!("{}[Paper]", GREY)));
    }
}
