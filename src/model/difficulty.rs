use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Extreme,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Extreme => 3,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            2 => Difficulty::Hard,
            3 => Difficulty::Extreme,
            _ => Difficulty::Medium,
        }
    }

    /// Parses a tier name as typed by a player, ignoring case.
    pub fn parse(name: &str) -> Option<Difficulty> {
        Difficulty::all()
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn low(&self) -> i64 {
        1
    }

    pub fn high(&self) -> i64 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 500,
            Difficulty::Extreme => 1000,
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.low(), self.high())
    }

    pub fn range(&self) -> RangeInclusive<i64> {
        self.low()..=self.high()
    }

    /// Width of the range, `high - low`. Zero for a single-value range.
    pub fn span(&self) -> i64 {
        self.high() - self.low()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.range().contains(&value)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_ordered() {
        for difficulty in Difficulty::all() {
            let (low, high) = difficulty.bounds();
            assert!(low <= high, "{} has low > high", difficulty);
        }
    }

    #[test]
    fn test_index_round_trips() {
        for difficulty in Difficulty::all() {
            assert_eq!(Difficulty::from_index(difficulty.index()), difficulty);
        }
        assert_eq!(Difficulty::from_index(99), Difficulty::Medium);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" EXTREME "), Some(Difficulty::Extreme));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }

    #[test]
    fn test_known_ranges() {
        assert_eq!(Difficulty::Easy.bounds(), (1, 50));
        assert_eq!(Difficulty::Medium.bounds(), (1, 100));
        assert_eq!(Difficulty::Medium.span(), 99);
    }
}
