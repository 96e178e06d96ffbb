use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;

use itertools::Itertools;
use log::warn;
use numguess::destroyable::Destroyable;
use numguess::events::{Channel, EventHandler};
use numguess::game::{ScoreStore, Session, SessionOptions, Settings};
use numguess::helpers::{format_seconds, format_timestamp};
use numguess::model::{
    Alert, Difficulty, GuessOutcome, ScoreTable, SessionCommand, SessionEvent,
};

const HELP: &str = "\
Type a number to guess. Other commands:
  hint                      reveal a clue (3 per round)
  reset                     restart the current round
  easy|medium|hard|extreme  switch difficulty
  multi                     toggle two-player mode
  names <first> <second>    rename the players
  scores                    show best scores and recent rounds
  help                      show this message
  quit                      leave the game";

fn init_logging() {
    env_logger::init();
}

enum Input {
    Command(SessionCommand),
    Scores,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();
    let input = match head.as_str() {
        "hint" => Input::Command(SessionCommand::RequestHint),
        "reset" => Input::Command(SessionCommand::ResetRound),
        "multi" => Input::Command(SessionCommand::ToggleMultiplayer),
        "names" => {
            let first = words.next().unwrap_or_default().to_string();
            let second = words.next().unwrap_or_default().to_string();
            Input::Command(SessionCommand::SetPlayerNames(first, second))
        }
        "scores" => Input::Scores,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => match Difficulty::parse(&head) {
            Some(difficulty) => Input::Command(SessionCommand::SelectDifficulty(difficulty)),
            None => Input::Command(SessionCommand::SubmitGuess(line.to_string())),
        },
    };
    Some(input)
}

struct ConsolePresenter;

impl EventHandler<SessionEvent> for ConsolePresenter {
    fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::RoundStarted {
                difficulty,
                low,
                high,
                multiplayer,
            } => {
                let mode = if *multiplayer { " (two players)" } else { "" };
                println!(
                    "\n{} round{}: guess a number between {} and {}",
                    difficulty, mode, low, high
                );
            }
            SessionEvent::GuessEvaluated {
                result,
                proximity,
                guess_count,
            } => match (result.outcome, proximity) {
                (GuessOutcome::Correct, _) => {
                    println!("Correct! The answer is {}", result.value)
                }
                (outcome, Some(proximity)) => {
                    let direction = if outcome == GuessOutcome::TooLow {
                        "Too low"
                    } else {
                        "Too high"
                    };
                    println!(
                        "{}! You're {} ({:.0}% close, guess #{})",
                        direction, proximity, result.closeness, guess_count
                    );
                }
                (_, None) => {}
            },
            SessionEvent::GuessRejected(err) | SessionEvent::HintRejected(err) => {
                println!("{}", err)
            }
            SessionEvent::HintIssued {
                hint,
                hints_remaining,
            } => println!("Hint: {} ({} left)", hint, hints_remaining),
            SessionEvent::TurnChanged(player) => println!("{}, your turn.", player.name),
            SessionEvent::RoundWon(summary) => {
                if let Some(winner) = &summary.winner {
                    println!("{} wins!", winner.name);
                }
                println!(
                    "Number of guesses: {}; time: {}",
                    summary.guesses,
                    format_seconds(summary.elapsed_seconds)
                );
                if summary.new_best {
                    println!("New best score for {}!", summary.difficulty);
                }
                println!("Type a difficulty or 'reset' to play again.");
            }
            SessionEvent::MultiplayerChanged { enabled, players } => {
                if *enabled {
                    println!(
                        "Two-player mode: {}",
                        players.iter().map(|player| &player.name).join(" vs ")
                    );
                } else {
                    println!("Single-player mode");
                }
            }
            SessionEvent::Alert(Alert::GuessSubmitted) | SessionEvent::ScoreTableChanged(_) => {}
            SessionEvent::Alert(Alert::RoundComplete) => {
                print!("\x07");
                let _ = io::stdout().flush();
            }
        }
    }
}

fn print_scores(table: &ScoreTable) {
    println!("Best scores:");
    for difficulty in Difficulty::all() {
        match table.best(difficulty) {
            Some(record) => println!(
                "  {:<8} {} guesses in {}",
                difficulty,
                record.guesses,
                format_seconds(record.elapsed_seconds)
            ),
            None => println!("  {:<8} -", difficulty),
        }
    }
    if table.recent.is_empty() {
        return;
    }
    println!("Recent rounds:");
    let lines = table
        .recent
        .iter()
        .map(|round| {
            format!(
                "  {}  {:<8} {} guesses, {}",
                format_timestamp(round.completed_at),
                round.difficulty,
                round.guesses,
                format_seconds(round.elapsed_seconds)
            )
        })
        .join("\n");
    println!("{}", lines);
}

/// Keeps a running clock in the terminal title while the player is typing.
fn show_clock(seconds: u64) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x1b]0;numguess {}\x07", format_seconds(seconds));
    let _ = stdout.flush();
}

fn prompt(session: &Session) {
    let (low, high) = session.bounds();
    let who = session
        .current_player()
        .map(|player| format!("{} ", player.name))
        .unwrap_or_default();
    print!(
        "[{}-{} | {} | hints {}] {}> ",
        low,
        high,
        format_seconds(session.elapsed_seconds()),
        session.hints_remaining(),
        who
    );
    let _ = io::stdout().flush();
}

fn main() {
    init_logging();

    let data_dir = Settings::data_dir();
    let settings = Settings::load(&data_dir);
    let store = ScoreStore::open(&data_dir);

    let (command_emitter, command_observer) = Channel::<SessionCommand>::new();
    let (event_emitter, event_observer) = Channel::<SessionEvent>::new();

    let presenter = Rc::new(RefCell::new(ConsolePresenter));
    let presenter_handle = presenter.clone();
    let event_subscription = event_observer.subscribe(move |event| {
        presenter_handle.borrow_mut().handle_event(event);
    });

    println!("NUMBER GUESSING GAME (type 'help' for commands)");
    let session = Session::new(
        command_observer,
        event_emitter,
        settings,
        store,
        SessionOptions::from_env(),
    );
    if io::stdout().is_terminal() {
        session.borrow_mut().set_tick_listener(show_clock);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt(&session.borrow());
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                warn!("Could not read input: {}", err);
                break;
            }
            None => break,
        };
        match parse_input(&line) {
            Some(Input::Command(command)) => command_emitter.emit(command),
            Some(Input::Scores) => print_scores(session.borrow().score_table()),
            Some(Input::Help) => println!("{}", HELP),
            Some(Input::Quit) => break,
            None => {}
        }
    }

    if let Err(err) = session.borrow().settings().save(&data_dir) {
        warn!("Could not save settings: {}", err);
    }
    session.borrow_mut().destroy();
    event_subscription.unsubscribe();
}
