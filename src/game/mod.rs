pub mod round;
pub mod score_store;
pub mod session;
pub mod settings;
pub mod timer;

pub use round::{Round, RoundState};
pub use score_store::ScoreStore;
pub use session::{parse_guess, Session, SessionOptions};
pub use settings::Settings;
pub use timer::Timer;
