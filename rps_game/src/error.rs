#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    InvalidSymbol(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::InvalidSymbol(input) => write!(fmt, "'{}' is not rock, paper or scissors", input),
        }
    }
}

impl std::error::Error for GameError {}
