use rps_game::GameError;

#[derive(Debug)]
pub enum ConsoleError {
    Core(rps_core::Error),
    Game(GameError),
    Io(std::io::Error),
}

impl From<rps_core::Error> for ConsoleError {
    fn from(err: rps_core::Error) -> ConsoleError {
        ConsoleError::Core(err)
    }
}

impl From<GameError> for ConsoleError {
    fn from(err: GameError) -> ConsoleError {
        ConsoleError::Game(err)
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> ConsoleError {
        ConsoleError::Io(err)
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Core(err) => write!(fmt, "hardware: {}", err),
            Self::Game(err) => write!(fmt, "{}", err),
            Self::Io(err) => write!(fmt, "io: {}", err),
        }
    }
}
