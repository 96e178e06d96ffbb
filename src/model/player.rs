use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER_NAMES: [&str; 2] = ["Player 1", "Player 2"];

#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub guess_count: u32,
}

impl Player {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            guess_count: 0,
        }
    }
}

/// The two seats of a multiplayer session and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    seats: [Player; 2],
    current: usize,
}

impl Default for Players {
    fn default() -> Self {
        Self {
            seats: [
                Player::new(DEFAULT_PLAYER_NAMES[0]),
                Player::new(DEFAULT_PLAYER_NAMES[1]),
            ],
            current: 0,
        }
    }
}

impl Players {
    pub fn current(&self) -> &Player {
        &self.seats[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn all(&self) -> &[Player] {
        &self.seats
    }

    pub fn record_guess(&mut self) {
        self.seats[self.current].guess_count += 1;
    }

    pub fn advance_turn(&mut self) -> &Player {
        self.current = 1 - self.current;
        self.current()
    }

    /// Blank names fall back to the seat's default.
    pub fn rename(&mut self, first: &str, second: &str) {
        for (index, name) in [first, second].into_iter().enumerate() {
            let name = name.trim();
            self.seats[index].name = if name.is_empty() {
                DEFAULT_PLAYER_NAMES[index].to_string()
            } else {
                name.to_string()
            };
        }
    }

    /// Zeroes counters and hands the turn back to the first seat, keeping names.
    pub fn new_round(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.guess_count = 0;
        }
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_alternates_strictly() {
        let mut players = Players::default();
        assert_eq!(players.current().name, "Player 1");
        assert_eq!(players.advance_turn().name, "Player 2");
        assert_eq!(players.advance_turn().name, "Player 1");
    }

    #[test]
    fn test_guesses_are_credited_to_current_player() {
        let mut players = Players::default();
        players.record_guess();
        players.advance_turn();
        players.record_guess();
        players.record_guess();
        assert_eq!(players.all()[0].guess_count, 1);
        assert_eq!(players.all()[1].guess_count, 2);
    }

    #[test]
    fn test_rename_falls_back_on_blank() {
        let mut players = Players::default();
        players.rename("  Ada ", "");
        assert_eq!(players.all()[0].name, "Ada");
        assert_eq!(players.all()[1].name, "Player 2");
    }

    #[test]
    fn test_new_round_keeps_names() {
        let mut players = Players::default();
        players.rename("Ada", "Grace");
        players.record_guess();
        players.advance_turn();
        players.new_round();
        assert_eq!(players.current_index(), 0);
        assert_eq!(players.all()[0].guess_count, 0);
        assert_eq!(players.all()[1].name, "Grace");
    }
}
