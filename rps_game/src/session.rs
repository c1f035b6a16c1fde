use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Outcome, ScoreBoard, Symbol};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    /// Nothing played since start or the last reset
    Idle,
    Played,
}

/// Everything the presentation side needs after a play
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Round {
    pub user: Symbol,
    pub opponent: Symbol,
    pub outcome: Outcome,
    pub score: ScoreBoard,
}

/// One player against a uniformly random opponent.
///
/// The session does no I/O and no locking; whoever owns it must make sure
/// `submit_choice` and `reset` are never entered concurrently.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    rng: R,
    last_user: Option<Symbol>,
    last_opponent: Option<Symbol>,
    score: ScoreBoard,
}

impl GameSession<StdRng> {
    /// Constructs a session whose opponent draws from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Constructs a session with a reproducible opponent
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            last_user: None,
            last_opponent: None,
            score: ScoreBoard::new(),
        }
    }

    pub fn submit_choice(&mut self, user: Symbol) -> Round {
        let opponent = Symbol::ALL[self.rng.gen_range(0..Symbol::ALL.len())];
        self.settle(user, opponent)
    }

    fn settle(&mut self, user: Symbol, opponent: Symbol) -> Round {
        let outcome = Outcome::of(user, opponent);
        self.score.record(outcome);
        self.last_user = Some(user);
        self.last_opponent = Some(opponent);

        Round {
            user,
            opponent,
            outcome,
            score: self.score,
        }
    }

    pub fn reset(&mut self) {
        self.last_user = None;
        self.last_opponent = None;
        self.score.reset();
    }

    pub fn win_rate(&self) -> f64 {
        self.score.win_rate()
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn last_user(&self) -> Option<Symbol> {
        self.last_user
    }

    pub fn last_opponent(&self) -> Option<Symbol> {
        self.last_opponent
    }

    pub fn phase(&self) -> Phase {
        match self.last_user {
            Some(_) => Phase::Played,
            None => Phase::Idle,
        }
    }
}
