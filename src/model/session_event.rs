use super::{Difficulty, GameError, GuessResult, Hint, Player, Proximity, ScoreRecord, ScoreTable};
use uuid::Uuid;

/// Side-effect signals the presentation layer may turn into sound or flashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    GuessSubmitted,
    RoundComplete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub secret: i64,
    pub guesses: u32,
    pub elapsed_seconds: u64,
    pub new_best: bool,
    pub previous_best: Option<ScoreRecord>,
    pub winner: Option<Player>,
    pub playthrough_id: Uuid,
}

impl RoundSummary {
    pub fn record(&self) -> ScoreRecord {
        ScoreRecord::new(self.guesses, self.elapsed_seconds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RoundStarted {
        difficulty: Difficulty,
        low: i64,
        high: i64,
        multiplayer: bool,
    },
    GuessEvaluated {
        result: GuessResult,
        /// `None` for a correct guess.
        proximity: Option<Proximity>,
        guess_count: u32,
    },
    GuessRejected(GameError),
    HintIssued {
        hint: Hint,
        hints_remaining: u32,
    },
    HintRejected(GameError),
    TurnChanged(Player),
    RoundWon(RoundSummary),
    ScoreTableChanged(ScoreTable),
    MultiplayerChanged {
        enabled: bool,
        players: Vec<Player>,
    },
    Alert(Alert),
}
