use std::fmt;

use crate::Symbol;

/// Result of a round, seen from the user's side
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn of(user: Symbol, opponent: Symbol) -> Self {
        if user == opponent {
            Self::Draw
        } else if user.beats(opponent) {
            Self::Win
        } else {
            Self::Loss
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Win => "You win!",
            Self::Loss => "You lose.",
            Self::Draw => "Draw.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}
