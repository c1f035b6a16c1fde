mod error;
mod outcome;
mod score;
mod session;
mod symbol;

pub use error::GameError;
pub use outcome::Outcome;
pub use score::ScoreBoard;
pub use session::{GameSession, Phase, Round};
pub use symbol::Symbol;
