use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Symbol {
    Scissors,
    Rock,
    Paper,
}

impl Symbol {
    /// Every symbol, in the order the board lays them out
    pub const ALL: [Symbol; 3] = [Symbol::Scissors, Symbol::Rock, Symbol::Paper];

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The one symbol this symbol defeats
    pub fn prey(&self) -> Symbol {
        match self {
            Symbol::Scissors => Symbol::Paper,
            Symbol::Paper => Symbol::Rock,
            Symbol::Rock => Symbol::Scissors,
        }
    }

    pub fn beats(&self, other: Symbol) -> bool {
        self.prey() == other
    }

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Scissors => "Scissors",
            Symbol::Rock => "Rock",
            Symbol::Paper => "Paper",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "scissors" => Ok(Symbol::Scissors),
            "r" | "rock" => Ok(Symbol::Rock),
            "p" | "paper" => Ok(Symbol::Paper),
            _ => Err(GameError::InvalidSymbol(s.to_owned())),
        }
    }
}
