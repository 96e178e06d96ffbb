mod difficulty;
mod error;
mod guess;
mod hint;
mod player;
mod score_record;
mod session_command;
mod session_event;
mod timer_state;

pub use difficulty::Difficulty;
pub use error::{GameError, StoreError};
pub use guess::{closeness, GuessOutcome, GuessResult, Proximity};
pub use hint::{Hint, Parity, HINT_DIVISORS, MAX_HINTS};
pub use player::{Player, Players, DEFAULT_PLAYER_NAMES};
pub use score_record::{
    RecentRound, ScoreRecord, ScoreTable, RECENT_ROUNDS_LIMIT, SCORE_TABLE_VERSION,
};
pub use session_command::SessionCommand;
pub use session_event::{Alert, RoundSummary, SessionEvent};
pub use timer_state::TimerState;
