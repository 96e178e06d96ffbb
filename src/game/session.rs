use log::{info, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::round::{Round, RoundState};
use super::score_store::ScoreStore;
use super::settings::Settings;
use super::timer::{Timer, TICK_INTERVAL};
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Alert, Difficulty, GameError, GuessOutcome, GuessResult, Hint, Player, Players, Proximity,
    RoundSummary, ScoreRecord, ScoreTable, SessionCommand, SessionEvent,
};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Fixed RNG seed for every new round.
    pub seed: Option<u64>,
    pub debug_mode: bool,
    pub tick_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            seed: None,
            debug_mode: false,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl SessionOptions {
    pub fn from_env() -> Self {
        Self {
            seed: Settings::seed_from_env(),
            debug_mode: Settings::is_debug_mode(),
            ..Self::default()
        }
    }
}

/// Validates raw guess text: trimmed ASCII digits only. Digit strings too large
/// to represent are out of range rather than invalid.
pub fn parse_guess(raw: &str, low: i64, high: i64) -> Result<i64, GameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidInput(raw.to_string()));
    }
    trimmed.parse::<i64>().map_err(|_| GameError::OutOfRange {
        value: trimmed.to_string(),
        low,
        high,
    })
}

pub struct Session {
    settings: Settings,
    options: SessionOptions,
    round: Round,
    timer: Timer,
    store: ScoreStore,
    multiplayer: bool,
    players: Players,
    subscription: Option<Unsubscriber<SessionCommand>>,
    event_emitter: EventEmitter<SessionEvent>,
}

impl Destroyable for Session {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.timer.stop();
    }
}

impl Session {
    /// Builds a session driven by `SessionCommand`s and starts the first round.
    pub fn new(
        command_observer: EventObserver<SessionCommand>,
        event_emitter: EventEmitter<SessionEvent>,
        settings: Settings,
        store: ScoreStore,
        options: SessionOptions,
    ) -> Rc<RefCell<Self>> {
        let session = Rc::new(RefCell::new(Self::detached(
            event_emitter,
            settings,
            store,
            options,
        )));
        Session::wire_subscription(session.clone(), command_observer);
        session.borrow_mut().start_round();
        session
    }

    /// A session without a command subscription. Call `start_round` to begin.
    pub fn detached(
        event_emitter: EventEmitter<SessionEvent>,
        settings: Settings,
        store: ScoreStore,
        options: SessionOptions,
    ) -> Self {
        let mut players = Players::default();
        players.rename(&settings.player_names[0], &settings.player_names[1]);
        Self {
            round: Round::idle(settings.difficulty),
            timer: Timer::with_interval(options.tick_interval),
            multiplayer: settings.multiplayer,
            players,
            settings,
            options,
            store,
            subscription: None,
            event_emitter,
        }
    }

    fn wire_subscription(
        session: Rc<RefCell<Self>>,
        command_observer: EventObserver<SessionCommand>,
    ) {
        let session_handler = Rc::downgrade(&session);
        let subscription = command_observer.subscribe(move |command| {
            if let Some(session) = session_handler.upgrade() {
                session.borrow_mut().handle_command(command.clone());
            }
        });
        session.borrow_mut().subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        trace!(target: "session", "Handling command: {:?}", command);
        match command {
            SessionCommand::SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            SessionCommand::SubmitGuess(raw) => {
                let _ = self.submit_guess(&raw);
            }
            SessionCommand::RequestHint => {
                let _ = self.request_hint();
            }
            SessionCommand::ToggleMultiplayer => self.toggle_multiplayer(),
            SessionCommand::SetPlayerNames(first, second) => {
                self.set_player_names(&first, &second)
            }
            SessionCommand::ResetRound => self.reset_round(),
        }
    }

    pub fn start_round(&mut self) {
        self.timer.reset();
        self.players.new_round();
        self.round.start(self.settings.difficulty, self.options.seed);
        if self.options.debug_mode {
            info!(target: "session", "Secret: {}", self.round.secret());
        } else {
            trace!(target: "session", "Secret: {}", self.round.secret());
        }
        let (low, high) = self.round.bounds();
        self.event_emitter.emit(SessionEvent::RoundStarted {
            difficulty: self.round.difficulty(),
            low,
            high,
            multiplayer: self.multiplayer,
        });
        if self.multiplayer {
            self.event_emitter
                .emit(SessionEvent::TurnChanged(self.players.current().clone()));
        }
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.timer.stop();
        self.settings.difficulty = difficulty;
        self.start_round();
    }

    pub fn reset_round(&mut self) {
        self.timer.stop();
        self.start_round();
    }

    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessResult, GameError> {
        let (low, high) = self.round.bounds();
        let result = parse_guess(raw, low, high).and_then(|value| self.round.submit_guess(value));
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                trace!(target: "session", "Guess {:?} rejected: {}", raw, err);
                self.event_emitter.emit(SessionEvent::GuessRejected(err.clone()));
                return Err(err);
            }
        };

        if !self.timer.is_started() {
            self.timer.start();
        }
        if self.multiplayer {
            self.players.record_guess();
        }
        self.event_emitter
            .emit(SessionEvent::Alert(Alert::GuessSubmitted));

        let proximity = match result.outcome {
            GuessOutcome::Correct => None,
            GuessOutcome::TooLow | GuessOutcome::TooHigh => Some(Proximity::from_distance(
                result.distance,
                self.round.difficulty().span(),
            )),
        };
        self.event_emitter.emit(SessionEvent::GuessEvaluated {
            result,
            proximity,
            guess_count: self.round.guess_count(),
        });

        if result.is_correct() {
            self.finish_round();
        } else if self.multiplayer {
            let next = self.players.advance_turn().clone();
            self.event_emitter.emit(SessionEvent::TurnChanged(next));
        }
        Ok(result)
    }

    fn finish_round(&mut self) {
        self.timer.stop();
        let difficulty = self.round.difficulty();
        let record = ScoreRecord::new(self.round.guess_count(), self.timer.elapsed());
        let previous_best = self.store.best(difficulty);
        let new_best = self.store.is_better(difficulty, &record);
        if let Err(err) = self
            .store
            .record(difficulty, record, self.round.playthrough_id())
        {
            warn!(target: "session", "Could not save scores: {}", err);
        }
        info!(
            target: "session",
            "Round won; difficulty: {}; guesses: {}; seconds: {}; new best: {}",
            difficulty, record.guesses, record.elapsed_seconds, new_best
        );

        let summary = RoundSummary {
            difficulty,
            secret: self.round.secret(),
            guesses: record.guesses,
            elapsed_seconds: record.elapsed_seconds,
            new_best,
            previous_best,
            winner: self.multiplayer.then(|| self.players.current().clone()),
            playthrough_id: self.round.playthrough_id(),
        };
        self.event_emitter.emit(SessionEvent::RoundWon(summary));
        self.event_emitter
            .emit(SessionEvent::ScoreTableChanged(self.store.table().clone()));
        self.event_emitter
            .emit(SessionEvent::Alert(Alert::RoundComplete));
    }

    pub fn request_hint(&mut self) -> Result<Hint, GameError> {
        match self.round.request_hint() {
            Ok(hint) => {
                self.event_emitter.emit(SessionEvent::HintIssued {
                    hint,
                    hints_remaining: self.round.hints_remaining(),
                });
                Ok(hint)
            }
            Err(err) => {
                info!(target: "session", "Hint refused: {}", err);
                self.event_emitter.emit(SessionEvent::HintRejected(err.clone()));
                Err(err)
            }
        }
    }

    pub fn toggle_multiplayer(&mut self) {
        self.multiplayer = !self.multiplayer;
        self.settings.multiplayer = self.multiplayer;
        self.players = Players::default();
        self.settings.player_names = self.player_names();
        self.emit_multiplayer_changed();
        self.reset_round();
    }

    pub fn set_player_names(&mut self, first: &str, second: &str) {
        self.players.rename(first, second);
        self.settings.player_names = self.player_names();
        self.emit_multiplayer_changed();
    }

    fn player_names(&self) -> [String; 2] {
        let all = self.players.all();
        [all[0].name.clone(), all[1].name.clone()]
    }

    fn emit_multiplayer_changed(&self) {
        self.event_emitter.emit(SessionEvent::MultiplayerChanged {
            enabled: self.multiplayer,
            players: self.players.all().to_vec(),
        });
    }

    /// Forwarded to the round timer; applies from the next timer start.
    pub fn set_tick_listener<F>(&mut self, listener: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.timer.set_tick_listener(listener);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.round.difficulty()
    }

    pub fn bounds(&self) -> (i64, i64) {
        self.round.bounds()
    }

    pub fn guess_count(&self) -> u32 {
        self.round.guess_count()
    }

    pub fn hints_remaining(&self) -> u32 {
        self.round.hints_remaining()
    }

    pub fn closeness(&self) -> Option<f64> {
        self.round.closeness()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed()
    }

    pub fn round_state(&self) -> RoundState {
        self.round.state()
    }

    pub fn score_table(&self) -> &ScoreTable {
        self.store.table()
    }

    pub fn is_multiplayer(&self) -> bool {
        self.multiplayer
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.multiplayer.then(|| self.players.current())
    }

    pub fn players(&self) -> &[Player] {
        self.players.all()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
