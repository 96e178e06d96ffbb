use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct,
    TooLow,
    TooHigh,
}

/// Qualitative distance label for a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Proximity {
    VeryClose,
    Close,
    Warm,
    Cold,
}

impl Proximity {
    /// Buckets a distance by its share of the tier span: 2%, 6% and 12% thresholds.
    pub fn from_distance(distance: i64, span: i64) -> Proximity {
        if span <= 0 {
            return Proximity::VeryClose;
        }
        let share = distance.unsigned_abs() as f64 / span as f64;
        if share <= 0.02 {
            Proximity::VeryClose
        } else if share <= 0.06 {
            Proximity::Close
        } else if share <= 0.12 {
            Proximity::Warm
        } else {
            Proximity::Cold
        }
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Proximity::VeryClose => "very close",
            Proximity::Close => "close",
            Proximity::Warm => "warm",
            Proximity::Cold => "cold",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessResult {
    pub value: i64,
    pub outcome: GuessOutcome,
    pub distance: i64,
    /// 0..=100, 100 being the secret itself.
    pub closeness: f64,
}

impl GuessResult {
    pub fn is_correct(&self) -> bool {
        self.outcome == GuessOutcome::Correct
    }
}

/// `100 * (1 - distance / span)` clamped to 0..=100.
pub fn closeness(distance: i64, span: i64) -> f64 {
    if span <= 0 {
        return 100.0;
    }
    let ratio = distance.unsigned_abs() as f64 / span as f64;
    (100.0 * (1.0 - ratio)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proximity_thresholds() {
        // span 100 keeps the percentages readable
        assert_eq!(Proximity::from_distance(0, 100), Proximity::VeryClose);
        assert_eq!(Proximity::from_distance(2, 100), Proximity::VeryClose);
        assert_eq!(Proximity::from_distance(3, 100), Proximity::Close);
        assert_eq!(Proximity::from_distance(6, 100), Proximity::Close);
        assert_eq!(Proximity::from_distance(7, 100), Proximity::Warm);
        assert_eq!(Proximity::from_distance(12, 100), Proximity::Warm);
        assert_eq!(Proximity::from_distance(13, 100), Proximity::Cold);
    }

    #[test]
    fn test_proximity_medium_tier_boundaries() {
        // Medium is 1..=100, so shares are taken of 99
        assert_eq!(Proximity::from_distance(1, 99), Proximity::VeryClose);
        assert_eq!(Proximity::from_distance(2, 99), Proximity::Close);
        assert_eq!(Proximity::from_distance(5, 99), Proximity::Close);
        assert_eq!(Proximity::from_distance(6, 99), Proximity::Warm);
        assert_eq!(Proximity::from_distance(11, 99), Proximity::Warm);
        assert_eq!(Proximity::from_distance(12, 99), Proximity::Cold);
    }

    #[test]
    fn test_proximity_degenerate_span() {
        assert_eq!(Proximity::from_distance(0, 0), Proximity::VeryClose);
    }

    #[test]
    fn test_closeness_bounds() {
        assert_eq!(closeness(0, 99), 100.0);
        assert_eq!(closeness(99, 99), 0.0);
        assert_eq!(closeness(500, 99), 0.0);
        assert_eq!(closeness(0, 0), 100.0);
        let half = closeness(50, 100);
        assert!((half - 50.0).abs() < f64::EPSILON);
    }
}
