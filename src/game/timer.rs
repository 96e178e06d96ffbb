use log::{debug, trace};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime};

use crate::model::TimerState;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Receives elapsed whole seconds on every tick. Runs on the ticker thread with
/// the timer lock released; `stop` waits for an in-flight call to return.
pub type TickListener = Arc<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Default)]
struct TimerShared {
    state: Option<TimerState>,
    /// Bumped on every start; a ticker only acts for its own run.
    run: u64,
    displayed_seconds: u64,
}

impl TimerShared {
    fn is_running(&self) -> bool {
        self.state.as_ref().map_or(false, TimerState::is_running)
    }

    fn elapsed_seconds(&self) -> u64 {
        self.state.as_ref().map_or(0, TimerState::elapsed_seconds)
    }
}

type Shared = Arc<(Mutex<TimerShared>, Condvar)>;

fn lock(shared: &Shared) -> MutexGuard<'_, TimerShared> {
    shared.0.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Round stopwatch with a background ticker for display refreshes.
pub struct Timer {
    shared: Shared,
    interval: Duration,
    listener: Option<TickListener>,
    ticker: Option<JoinHandle<()>>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            shared: Arc::new((Mutex::new(TimerShared::default()), Condvar::new())),
            interval,
            listener: None,
            ticker: None,
        }
    }

    /// Takes effect from the next `start`.
    pub fn set_tick_listener<F>(&mut self, listener: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(listener));
    }

    /// Starting a running timer does nothing.
    pub fn start(&mut self) {
        let run = {
            let mut shared = lock(&self.shared);
            if shared.is_running() {
                return;
            }
            shared.state = Some(TimerState::started_at(SystemTime::now()));
            shared.run += 1;
            shared.displayed_seconds = 0;
            shared.run
        };
        self.join_ticker();
        debug!(target: "timer", "Timer started (run {})", run);

        let shared = Arc::clone(&self.shared);
        let listener = self.listener.clone();
        let interval = self.interval;
        self.ticker = Some(thread::spawn(move || {
            Timer::tick_loop(shared, run, interval, listener)
        }));
    }

    fn tick_loop(shared: Shared, run: u64, interval: Duration, listener: Option<TickListener>) {
        let mut next_tick = Instant::now() + interval;
        loop {
            let seconds = {
                let mut guard = lock(&shared);
                loop {
                    if guard.run != run || !guard.is_running() {
                        trace!(target: "timer", "Ticker for run {} finished", run);
                        return;
                    }
                    let now = Instant::now();
                    if now >= next_tick {
                        break;
                    }
                    guard = match shared.1.wait_timeout(guard, next_tick - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    };
                }
                let seconds = guard.elapsed_seconds();
                guard.displayed_seconds = seconds;
                seconds
            };

            trace!(target: "timer", "Tick: {}s", seconds);
            if let Some(listener) = &listener {
                listener(seconds);
            }

            // missed ticks are skipped, not replayed back to back
            next_tick = (next_tick + interval).max(Instant::now());
        }
    }

    /// Freezes the elapsed time. Safe to call repeatedly or before `start`.
    pub fn stop(&mut self) {
        {
            let mut shared = lock(&self.shared);
            if let Some(state) = shared.state.take() {
                let ended = state.ended(SystemTime::now());
                shared.displayed_seconds = ended.elapsed_seconds();
                shared.state = Some(ended);
            }
        }
        self.shared.1.notify_all();
        self.join_ticker();
    }

    /// Stops and forgets the current run.
    pub fn reset(&mut self) {
        self.stop();
        let mut shared = lock(&self.shared);
        shared.state = None;
        shared.displayed_seconds = 0;
    }

    fn join_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            if ticker.join().is_err() {
                log::warn!(target: "timer", "Ticker thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).is_running()
    }

    pub fn is_started(&self) -> bool {
        lock(&self.shared).state.is_some()
    }

    pub fn elapsed(&self) -> u64 {
        lock(&self.shared).elapsed_seconds()
    }

    /// Value published by the most recent tick, or by `stop`.
    pub fn displayed_seconds(&self) -> u64 {
        lock(&self.shared).displayed_seconds
    }

    pub fn state(&self) -> Option<TimerState> {
        lock(&self.shared).state.clone()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}
