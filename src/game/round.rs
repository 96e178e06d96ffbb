use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::model::{
    closeness, Difficulty, GameError, GuessOutcome, GuessResult, Hint, MAX_HINTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    InProgress,
    Won,
}

/// One secret number and the guesses and hints spent on it.
#[derive(Debug, Clone)]
pub struct Round {
    difficulty: Difficulty,
    secret: i64,
    seed: u64,
    guess_count: u32,
    hints_used: u32,
    state: RoundState,
    last_result: Option<GuessResult>,
    playthrough_id: Uuid,
}

impl Round {
    /// An idle round; `start` must be called before guessing.
    pub fn idle(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            secret: difficulty.low(),
            seed: 0,
            guess_count: 0,
            hints_used: 0,
            state: RoundState::Idle,
            last_result: None,
            playthrough_id: Uuid::nil(),
        }
    }

    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let mut round = Round::idle(difficulty);
        round.start(difficulty, seed);
        round
    }

    /// Builds an in-progress round around a known secret.
    pub fn with_secret(difficulty: Difficulty, secret: i64) -> Result<Self, GameError> {
        if !difficulty.contains(secret) {
            let (low, high) = difficulty.bounds();
            return Err(GameError::OutOfRange {
                value: secret.to_string(),
                low,
                high,
            });
        }
        let mut round = Round::idle(difficulty);
        round.begin(secret, 0);
        Ok(round)
    }

    pub fn start(&mut self, difficulty: Difficulty, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        self.difficulty = difficulty;
        let secret = rng.random_range(difficulty.range());
        self.begin(secret, seed);
        info!(target: "round", "New round; difficulty: {}; seed: {}", difficulty, seed);
    }

    fn begin(&mut self, secret: i64, seed: u64) {
        self.secret = secret;
        self.seed = seed;
        self.guess_count = 0;
        self.hints_used = 0;
        self.last_result = None;
        self.playthrough_id = Uuid::new_v4();
        self.state = RoundState::InProgress;
    }

    pub fn submit_guess(&mut self, value: i64) -> Result<GuessResult, GameError> {
        if self.state != RoundState::InProgress {
            return Err(GameError::RoundNotActive);
        }
        let (low, high) = self.difficulty.bounds();
        if !self.difficulty.contains(value) {
            return Err(GameError::OutOfRange {
                value: value.to_string(),
                low,
                high,
            });
        }

        self.guess_count += 1;
        let distance = (value - self.secret).abs();
        let outcome = if value < self.secret {
            GuessOutcome::TooLow
        } else if value > self.secret {
            GuessOutcome::TooHigh
        } else {
            GuessOutcome::Correct
        };
        let result = GuessResult {
            value,
            outcome,
            distance,
            closeness: closeness(distance, self.difficulty.span()),
        };
        trace!(target: "round", "Guess #{}: {:?}", self.guess_count, result);

        if outcome == GuessOutcome::Correct {
            self.state = RoundState::Won;
        }
        self.last_result = Some(result);
        Ok(result)
    }

    pub fn request_hint(&mut self) -> Result<Hint, GameError> {
        if self.state != RoundState::InProgress {
            return Err(GameError::RoundNotActive);
        }
        if self.hints_used >= MAX_HINTS {
            return Err(GameError::HintsExhausted);
        }
        let (low, high) = self.difficulty.bounds();
        let hint = Hint::for_slot(self.hints_used, self.secret, low, high);
        self.hints_used += 1;
        Ok(hint)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn bounds(&self) -> (i64, i64) {
        self.difficulty.bounds()
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> u32 {
        MAX_HINTS.saturating_sub(self.hints_used)
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn last_result(&self) -> Option<GuessResult> {
        self.last_result
    }

    pub fn closeness(&self) -> Option<f64> {
        self.last_result.map(|result| result.closeness)
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }
}
